// Graph Model
//
// Undirected, simple, string-labeled graph backed by petgraph. Insertion
// interns labels so callers work with member names while the algorithms
// work with compact indices.

pub mod metrics;

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

use sociogram_common::Edge;

#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    graph: UnGraph<String, f32>,
    index: HashMap<String, NodeIndex>,
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from an edge list, dropping self-loops and duplicates.
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge);
        }
        graph
    }

    /// Interns a node label, creating the node on first sight.
    pub fn add_node(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(label.to_string());
        self.index.insert(label.to_string(), idx);
        idx
    }

    /// Inserts an edge, creating missing endpoints. Returns false when the
    /// edge is a self-loop or already present.
    pub fn add_edge(&mut self, edge: &Edge) -> bool {
        if edge.is_loop() {
            return false;
        }
        let a = self.add_node(&edge.source);
        let b = self.add_node(&edge.target);
        if self.graph.find_edge(a, b).is_some() {
            return false;
        }
        self.graph.add_edge(a, b, edge.weight);
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node labels in sorted order.
    pub fn nodes(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.index.keys().cloned().collect();
        labels.sort();
        labels
    }

    /// Edges with canonical endpoint order, sorted for stable output.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .graph
            .edge_references()
            .map(|e| {
                let (a, b) = (self.label_of(e.source()), self.label_of(e.target()));
                if a <= b {
                    Edge::weighted(a, b, *e.weight())
                } else {
                    Edge::weighted(b, a, *e.weight())
                }
            })
            .collect();
        edges.sort_by(|x, y| (&x.source, &x.target).cmp(&(&y.source, &y.target)));
        edges
    }

    pub fn neighbors(&self, label: &str) -> Vec<String> {
        let Some(&idx) = self.index.get(label) else {
            return Vec::new();
        };
        let mut out: Vec<String> = self
            .graph
            .neighbors(idx)
            .map(|n| self.label_of(n).to_string())
            .collect();
        out.sort();
        out
    }

    pub fn degree(&self, label: &str) -> usize {
        self.index
            .get(label)
            .map(|&idx| self.graph.neighbors(idx).count())
            .unwrap_or(0)
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(&ia), Some(&ib)) => self.graph.find_edge(ia, ib).is_some(),
            _ => false,
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.graph
            .edge_references()
            .map(|e| *e.weight() as f64)
            .sum()
    }

    pub fn is_connected(&self) -> bool {
        self.node_count() > 0 && connected_components(&self.graph) == 1
    }

    // --- Index-level access for the algorithms ---
    //
    // Nodes are never removed, so petgraph indices stay compact in 0..n.

    pub(crate) fn inner(&self) -> &UnGraph<String, f32> {
        &self.graph
    }

    pub(crate) fn label_of(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }

    pub(crate) fn node_index(&self, label: &str) -> Option<NodeIndex> {
        self.index.get(label).copied()
    }

    /// Edge list as (source index, target index, weight) triples.
    pub(crate) fn index_edges(&self) -> Vec<(usize, usize, f32)> {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
            .collect()
    }

    /// Node degrees indexed by compact node index.
    pub(crate) fn degrees(&self) -> Vec<usize> {
        self.graph
            .node_indices()
            .map(|idx| self.graph.neighbors(idx).count())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> SocialGraph {
        SocialGraph::from_edges(&[
            Edge::new("1", "2"),
            Edge::new("2", "3"),
            Edge::new("3", "4"),
            Edge::new("4", "1"),
        ])
    }

    #[test]
    fn test_insertion_dedupes() {
        let mut g = SocialGraph::new();
        assert!(g.add_edge(&Edge::new("a", "b")));
        assert!(!g.add_edge(&Edge::new("b", "a")), "reversed duplicate");
        assert!(!g.add_edge(&Edge::new("a", "a")), "self-loop");
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_neighbors_and_degree() {
        let g = ring();
        assert_eq!(g.neighbors("1"), vec!["2".to_string(), "4".to_string()]);
        assert_eq!(g.degree("1"), 2);
        assert_eq!(g.degree("missing"), 0);
        assert!(g.has_edge("3", "4"));
        assert!(!g.has_edge("1", "3"));
    }

    #[test]
    fn test_connectivity() {
        let mut g = ring();
        assert!(g.is_connected());
        g.add_edge(&Edge::new("x", "y"));
        assert!(!g.is_connected());
        assert!(!SocialGraph::new().is_connected());
    }

    #[test]
    fn test_edges_are_canonical() {
        let g = SocialGraph::from_edges(&[Edge::new("b", "a"), Edge::new("a", "c")]);
        let edges = g.edges();
        assert_eq!(edges[0].source, "a");
        assert_eq!(edges[0].target, "b");
        assert_eq!(edges[1].target, "c");
    }
}
