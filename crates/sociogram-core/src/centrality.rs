// Centrality measures.
//
// Degree, betweenness (Brandes), closeness (Wasserman-Faust scaled so
// disconnected graphs stay comparable) and eigenvector centrality via
// power iteration. Eigenvector falls back to degree centrality when the
// iteration fails to converge.

use std::collections::HashMap;

use petgraph::visit::EdgeRef;
use sociogram_common::config::CentralityConfig;
use tracing::warn;

use crate::graph::metrics::bfs_distances;
use crate::graph::SocialGraph;

/// All centrality measures keyed by node label.
#[derive(Debug, Clone)]
pub struct CentralityScores {
    pub degree: HashMap<String, f64>,
    pub betweenness: HashMap<String, f64>,
    pub closeness: HashMap<String, f64>,
    pub eigenvector: HashMap<String, f64>,
}

impl CentralityScores {
    pub fn compute(graph: &SocialGraph, config: &CentralityConfig) -> Self {
        Self {
            degree: degree_centrality(graph),
            betweenness: betweenness_centrality(graph),
            closeness: closeness_centrality(graph),
            eigenvector: eigenvector_centrality(graph, config),
        }
    }

    /// Highest-scoring node for a measure, smallest label on ties.
    pub fn argmax(scores: &HashMap<String, f64>) -> Option<(&str, f64)> {
        scores
            .iter()
            .max_by(|a, b| {
                a.1.partial_cmp(b.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| b.0.cmp(a.0))
            })
            .map(|(node, score)| (node.as_str(), *score))
    }
}

/// Degree divided by (n - 1).
pub fn degree_centrality(graph: &SocialGraph) -> HashMap<String, f64> {
    let n = graph.node_count();
    let scale = if n > 1 { 1.0 / (n as f64 - 1.0) } else { 0.0 };

    graph
        .inner()
        .node_indices()
        .map(|idx| {
            let degree = graph.inner().neighbors(idx).count() as f64;
            (graph.label_of(idx).to_string(), degree * scale)
        })
        .collect()
}

/// Brandes' algorithm on unweighted shortest paths, normalized by
/// (n - 1)(n - 2) as for undirected graphs.
pub fn betweenness_centrality(graph: &SocialGraph) -> HashMap<String, f64> {
    let inner = graph.inner();
    let n = inner.node_count();
    let mut centrality = vec![0.0f64; n];

    for source in inner.node_indices() {
        let s = source.index();

        let mut stack: Vec<usize> = Vec::new();
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0f64; n];
        let mut dist: Vec<i64> = vec![-1; n];
        sigma[s] = 1.0;
        dist[s] = 0;

        let mut queue = std::collections::VecDeque::new();
        queue.push_back(s);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for w in inner.neighbors(petgraph::graph::NodeIndex::new(v)) {
                let w = w.index();
                if dist[w] < 0 {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    preds[w].push(v);
                }
            }
        }

        let mut delta = vec![0.0f64; n];
        while let Some(w) = stack.pop() {
            for &v in &preds[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
            if w != s {
                centrality[w] += delta[w];
            }
        }
    }

    // Each unordered pair was counted from both endpoints; the usual
    // normalization folds the halving into the (n-1)(n-2) factor.
    let scale = if n > 2 {
        1.0 / ((n as f64 - 1.0) * (n as f64 - 2.0))
    } else {
        0.0
    };

    inner
        .node_indices()
        .map(|idx| (graph.label_of(idx).to_string(), centrality[idx.index()] * scale))
        .collect()
}

/// Closeness with the Wasserman-Faust correction: (r-1)/totsp * (r-1)/(n-1),
/// where r counts the nodes reachable from the subject.
pub fn closeness_centrality(graph: &SocialGraph) -> HashMap<String, f64> {
    let n = graph.node_count();

    graph
        .inner()
        .node_indices()
        .map(|idx| {
            let distances = bfs_distances(graph, idx);
            let reachable: Vec<u32> = distances.into_iter().flatten().collect();
            let r = reachable.len() as f64;
            let total: u64 = reachable.iter().map(|&d| d as u64).sum();

            let score = if total > 0 && n > 1 {
                ((r - 1.0) / total as f64) * ((r - 1.0) / (n as f64 - 1.0))
            } else {
                0.0
            };
            (graph.label_of(idx).to_string(), score)
        })
        .collect()
}

/// Power iteration on (I + A), L2-normalized each step. Falls back to
/// degree centrality when the iteration cap is hit without convergence.
pub fn eigenvector_centrality(
    graph: &SocialGraph,
    config: &CentralityConfig,
) -> HashMap<String, f64> {
    let inner = graph.inner();
    let n = inner.node_count();
    if n == 0 {
        return HashMap::new();
    }

    let mut x = vec![1.0 / n as f64; n];

    for _ in 0..config.eigenvector_max_iter {
        let xlast = x.clone();
        for edge in inner.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            let w = *edge.weight() as f64;
            x[a] += xlast[b] * w;
            x[b] += xlast[a] * w;
        }

        let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut x {
                *v /= norm;
            }
        }

        let drift: f64 = x.iter().zip(&xlast).map(|(a, b)| (a - b).abs()).sum();
        if drift < n as f64 * config.eigenvector_tolerance {
            return inner
                .node_indices()
                .map(|idx| (graph.label_of(idx).to_string(), x[idx.index()]))
                .collect();
        }
    }

    warn!(
        max_iter = config.eigenvector_max_iter,
        "eigenvector centrality did not converge, falling back to degree centrality"
    );
    degree_centrality(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sociogram_common::Edge;

    fn star() -> SocialGraph {
        SocialGraph::from_edges(&[
            Edge::new("hub", "a"),
            Edge::new("hub", "b"),
            Edge::new("hub", "c"),
        ])
    }

    #[test]
    fn test_degree_centrality_on_star() {
        let scores = degree_centrality(&star());
        assert!((scores["hub"] - 1.0).abs() < 1e-12);
        assert!((scores["a"] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_betweenness_hub_carries_everything() {
        let scores = betweenness_centrality(&star());
        assert!((scores["hub"] - 1.0).abs() < 1e-12);
        assert_eq!(scores["a"], 0.0);

        // Path a-b-c: the middle node sits on the only a..c path.
        let path = SocialGraph::from_edges(&[Edge::new("a", "b"), Edge::new("b", "c")]);
        let scores = betweenness_centrality(&path);
        assert!((scores["b"] - 1.0).abs() < 1e-12);
        assert_eq!(scores["a"], 0.0);
    }

    #[test]
    fn test_betweenness_on_ring_of_four() {
        let ring = SocialGraph::from_edges(&[
            Edge::new("1", "2"),
            Edge::new("2", "3"),
            Edge::new("3", "4"),
            Edge::new("4", "1"),
        ]);
        let scores = betweenness_centrality(&ring);
        for node in ["1", "2", "3", "4"] {
            assert!((scores[node] - 1.0 / 6.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_closeness_on_star_and_split_graph() {
        let scores = closeness_centrality(&star());
        assert!((scores["hub"] - 1.0).abs() < 1e-12);
        assert!((scores["a"] - 0.6).abs() < 1e-12);

        // Two components: scores stay finite and below the connected case.
        let split = SocialGraph::from_edges(&[Edge::new("a", "b"), Edge::new("c", "d")]);
        let scores = closeness_centrality(&split);
        assert!((scores["a"] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_eigenvector_uniform_on_ring() {
        let ring = SocialGraph::from_edges(&[
            Edge::new("1", "2"),
            Edge::new("2", "3"),
            Edge::new("3", "4"),
            Edge::new("4", "1"),
        ]);
        let scores = eigenvector_centrality(&ring, &CentralityConfig::default());
        for node in ["1", "2", "3", "4"] {
            assert!((scores[node] - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_eigenvector_fallback_when_capped() {
        let config = CentralityConfig {
            eigenvector_max_iter: 0,
            eigenvector_tolerance: 0.0,
        };
        let scores = eigenvector_centrality(&star(), &config);
        assert_eq!(scores, degree_centrality(&star()));
    }

    #[test]
    fn test_argmax_breaks_ties_on_label() {
        let mut scores = HashMap::new();
        scores.insert("b".to_string(), 1.0);
        scores.insert("a".to_string(), 1.0);
        assert_eq!(CentralityScores::argmax(&scores), Some(("a", 1.0)));
    }
}
