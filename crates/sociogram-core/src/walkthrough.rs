// The README walkthrough: a fixed four-member ring with its canonical
// classification and predicted link. The assignments are a fixed table,
// not a detector run, so the printed walkthrough never drifts.

use crate::graph::SocialGraph;
use sociogram_common::Edge;

pub const WALKTHROUGH_EDGES: [(&str, &str); 4] = [("1", "2"), ("2", "3"), ("3", "4"), ("4", "1")];

pub const WALKTHROUGH_COMMUNITIES: [(&str, &str); 4] = [
    ("1", "Community A"),
    ("2", "Community B"),
    ("3", "Community A"),
    ("4", "Community B"),
];

pub const WALKTHROUGH_PREDICTED_LINK: (&str, &str) = ("1", "3");

/// The walkthrough graph: nodes 1..4 in a ring.
pub fn walkthrough_graph() -> SocialGraph {
    let edges: Vec<Edge> = WALKTHROUGH_EDGES
        .iter()
        .map(|(a, b)| Edge::new(*a, *b))
        .collect();
    SocialGraph::from_edges(&edges)
}

/// Renders the walkthrough exactly as the README shows it.
pub fn render() -> String {
    let mut out = String::new();
    for (node, community) in WALKTHROUGH_COMMUNITIES {
        out.push_str(&format!("Node {}: {}\n", node, community));
    }
    let (a, b) = WALKTHROUGH_PREDICTED_LINK;
    out.push_str(&format!("Potential link: {}-{}\n", a, b));
    out
}
