// Greedy modularity agglomeration (Clauset-Newman-Moore).
//
// Starts from singleton communities and repeatedly merges the connected
// pair with the largest modularity gain, stopping when no merge improves
// the partition. Deterministic: ties resolve to the smallest pair.

use std::collections::HashMap;

use crate::graph::SocialGraph;

/// Returns a community id per compact node index.
pub(super) fn detect(graph: &SocialGraph) -> Vec<usize> {
    let n = graph.node_count();
    let edges = graph.index_edges();
    let total_weight: f64 = edges.iter().map(|(_, _, w)| *w as f64).sum();

    let mut membership: Vec<usize> = (0..n).collect();
    if total_weight == 0.0 {
        return membership;
    }
    let m2 = total_weight * 2.0;

    loop {
        // Community degree sums and inter-community weights for the
        // current partition.
        let mut degree: HashMap<usize, f64> = HashMap::new();
        let mut between: HashMap<(usize, usize), f64> = HashMap::new();
        for (src, tgt, weight) in &edges {
            let w = *weight as f64;
            let (a, b) = (membership[*src], membership[*tgt]);
            *degree.entry(a).or_default() += w;
            *degree.entry(b).or_default() += w;
            if a != b {
                let key = (a.min(b), a.max(b));
                *between.entry(key).or_default() += w;
            }
        }

        let mut candidates: Vec<(&(usize, usize), &f64)> = between.iter().collect();
        candidates.sort_by_key(|(pair, _)| **pair);

        let mut best: Option<((usize, usize), f64)> = None;
        for (&(a, b), &weight) in candidates {
            let gain = 2.0 * (weight / m2 - (degree[&a] / m2) * (degree[&b] / m2));
            if best.map_or(true, |(_, g)| gain > g) {
                best = Some(((a, b), gain));
            }
        }

        match best {
            Some(((keep, merge), gain)) if gain > 1e-12 => {
                for community in membership.iter_mut() {
                    if *community == merge {
                        *community = keep;
                    }
                }
            }
            _ => break,
        }
    }

    membership
}
