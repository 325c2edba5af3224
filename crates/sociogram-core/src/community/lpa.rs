// Label propagation.
//
// Every node starts in its own community and repeatedly adopts the label
// carrying the most weight among its neighbors, until a pass changes
// nothing. Visit order is shuffled per pass to avoid propagation artifacts.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::graph::SocialGraph;

/// Returns a community id per compact node index.
pub(super) fn detect(graph: &SocialGraph, max_iterations: usize, weighted: bool) -> Vec<usize> {
    let n = graph.node_count();
    let mut adjacency: Vec<Vec<(usize, f32)>> = vec![Vec::new(); n];
    for (src, tgt, weight) in graph.index_edges() {
        let w = if weighted { weight } else { 1.0 };
        adjacency[src].push((tgt, w));
        adjacency[tgt].push((src, w));
    }

    // Init: each node is its own community
    let mut labels: Vec<usize> = (0..n).collect();
    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = thread_rng();

    for _ in 0..max_iterations {
        order.shuffle(&mut rng);
        let mut changed = false;

        for &node in &order {
            if adjacency[node].is_empty() {
                continue;
            }

            let mut label_weights: HashMap<usize, f32> = HashMap::new();
            for &(neighbor, weight) in &adjacency[node] {
                *label_weights.entry(labels[neighbor]).or_default() += weight;
            }

            if let Some((&best_label, _)) = label_weights
                .iter()
                .max_by(|a, b| {
                    a.1.partial_cmp(b.1)
                        .unwrap_or(std::cmp::Ordering::Equal)
                        .then_with(|| b.0.cmp(a.0))
                })
            {
                if labels[node] != best_label {
                    labels[node] = best_label;
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }

    labels
}
