// Structural metrics over the whole graph.
//
// Path-based measures (average path length, diameter) are defined for
// connected graphs only and report 0 otherwise, matching how the analysis
// report treats disconnected input.

use std::collections::VecDeque;

use petgraph::graph::NodeIndex;

use super::SocialGraph;

/// Edge density: 2m / (n * (n - 1)). Zero for fewer than two nodes.
pub fn density(graph: &SocialGraph) -> f64 {
    let n = graph.node_count() as f64;
    if n < 2.0 {
        return 0.0;
    }
    let m = graph.edge_count() as f64;
    2.0 * m / (n * (n - 1.0))
}

/// Mean node degree. Zero for the empty graph.
pub fn average_degree(graph: &SocialGraph) -> f64 {
    let n = graph.node_count();
    if n == 0 {
        return 0.0;
    }
    graph.degrees().iter().sum::<usize>() as f64 / n as f64
}

/// Unweighted single-source shortest path lengths (BFS hops).
pub(crate) fn bfs_distances(graph: &SocialGraph, start: NodeIndex) -> Vec<Option<u32>> {
    let inner = graph.inner();
    let mut dist: Vec<Option<u32>> = vec![None; inner.node_count()];
    let mut queue = VecDeque::new();

    dist[start.index()] = Some(0);
    queue.push_back(start);

    while let Some(node) = queue.pop_front() {
        let d = dist[node.index()].unwrap_or(0);
        for neighbor in inner.neighbors(node) {
            if dist[neighbor.index()].is_none() {
                dist[neighbor.index()] = Some(d + 1);
                queue.push_back(neighbor);
            }
        }
    }

    dist
}

/// Mean shortest path length over all node pairs. Zero when the graph is
/// disconnected or has fewer than two nodes.
pub fn average_path_length(graph: &SocialGraph) -> f64 {
    let n = graph.node_count();
    if n < 2 || !graph.is_connected() {
        return 0.0;
    }

    let mut total = 0u64;
    for start in graph.inner().node_indices() {
        for d in bfs_distances(graph, start).into_iter().flatten() {
            total += d as u64;
        }
    }

    // Every unordered pair was counted twice.
    total as f64 / (n as f64 * (n as f64 - 1.0))
}

/// Longest shortest path. Zero when disconnected or trivial.
pub fn diameter(graph: &SocialGraph) -> u32 {
    if graph.node_count() < 2 || !graph.is_connected() {
        return 0;
    }

    let mut max = 0u32;
    for start in graph.inner().node_indices() {
        for d in bfs_distances(graph, start).into_iter().flatten() {
            max = max.max(d);
        }
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;
    use sociogram_common::Edge;

    fn ring() -> SocialGraph {
        SocialGraph::from_edges(&[
            Edge::new("1", "2"),
            Edge::new("2", "3"),
            Edge::new("3", "4"),
            Edge::new("4", "1"),
        ])
    }

    #[test]
    fn test_ring_metrics() {
        let g = ring();
        assert!((density(&g) - 2.0 / 3.0).abs() < 1e-12);
        assert!((average_degree(&g) - 2.0).abs() < 1e-12);
        assert!((average_path_length(&g) - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(diameter(&g), 2);
    }

    #[test]
    fn test_disconnected_path_measures_are_zero() {
        let g = SocialGraph::from_edges(&[Edge::new("a", "b"), Edge::new("c", "d")]);
        assert_eq!(average_path_length(&g), 0.0);
        assert_eq!(diameter(&g), 0);
        assert!(density(&g) > 0.0);
    }

    #[test]
    fn test_empty_graph() {
        let g = SocialGraph::new();
        assert_eq!(density(&g), 0.0);
        assert_eq!(average_degree(&g), 0.0);
        assert_eq!(average_path_length(&g), 0.0);
        assert_eq!(diameter(&g), 0);
    }
}
