// Louvain modularity optimization.
//
// Phase 1 moves nodes between neighboring communities while the gain is
// positive; phase 2 collapses each community into a supernode and repeats.
// The best partition seen across levels wins.

use std::collections::{HashMap, HashSet};

use crate::graph::SocialGraph;

/// Returns a community id per compact node index.
pub(super) fn detect(graph: &SocialGraph, max_iterations: usize, resolution: f32) -> Vec<usize> {
    let n = graph.node_count();
    let mut level = LevelGraph::from_social(graph);
    if level.total_weight == 0.0 {
        return (0..n).collect();
    }

    // node_map[i] = supernode currently holding original node i
    let mut node_map: Vec<usize> = (0..n).collect();
    let mut best_assignment: Vec<usize> = (0..n).collect();
    let mut best_modularity = -1.0;

    for _ in 0..max_iterations {
        let improved = level.optimize_modularity(resolution);

        let current_modularity = level.compute_modularity(resolution);
        if current_modularity > best_modularity {
            best_modularity = current_modularity;
            best_assignment = node_map
                .iter()
                .map(|&supernode| level.communities[supernode])
                .collect();
        }

        if !improved {
            break;
        }

        let (aggregated, remap) = level.aggregate();
        for slot in node_map.iter_mut() {
            *slot = remap[&level.communities[*slot]];
        }
        level = aggregated;
    }

    best_assignment
}

struct LevelGraph {
    node_count: usize,
    /// Community id per node of this level.
    communities: Vec<usize>,
    edges: Vec<(usize, usize, f32)>,
    degrees: Vec<f64>,
    total_weight: f64,
}

impl LevelGraph {
    fn from_social(graph: &SocialGraph) -> Self {
        let node_count = graph.node_count();
        let edges = graph.index_edges();

        let mut degrees = vec![0.0; node_count];
        let mut total_weight = 0.0;
        for (src, tgt, weight) in &edges {
            let w = *weight as f64;
            degrees[*src] += w;
            degrees[*tgt] += w;
            total_weight += w;
        }

        Self {
            node_count,
            communities: (0..node_count).collect(),
            edges,
            degrees,
            total_weight,
        }
    }

    fn optimize_modularity(&mut self, resolution: f32) -> bool {
        let mut improved = false;
        let m2 = self.total_weight * 2.0;

        for node_idx in 0..self.node_count {
            let current_comm = self.communities[node_idx];

            // Edge weight from this node into each neighboring community.
            let mut neighbor_comms: HashMap<usize, f64> = HashMap::new();
            for (src, tgt, weight) in &self.edges {
                if *src == node_idx {
                    let neighbor_comm = self.communities[*tgt];
                    *neighbor_comms.entry(neighbor_comm).or_default() += *weight as f64;
                } else if *tgt == node_idx {
                    let neighbor_comm = self.communities[*src];
                    *neighbor_comms.entry(neighbor_comm).or_default() += *weight as f64;
                }
            }

            let mut best_comm = current_comm;
            let mut best_gain = 0.0;

            for (comm, edge_weight) in neighbor_comms {
                if comm == current_comm {
                    continue;
                }

                let gain = self.modularity_gain(node_idx, comm, edge_weight, m2, resolution);
                if gain > best_gain {
                    best_gain = gain;
                    best_comm = comm;
                }
            }

            if best_comm != current_comm {
                self.communities[node_idx] = best_comm;
                improved = true;
            }
        }

        improved
    }

    fn modularity_gain(
        &self,
        node_idx: usize,
        target_comm: usize,
        edge_weight: f64,
        m2: f64,
        resolution: f32,
    ) -> f64 {
        let node_degree = self.degrees[node_idx];

        let comm_degree: f64 = self
            .communities
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == target_comm)
            .map(|(idx, _)| self.degrees[idx])
            .sum();

        edge_weight - (resolution as f64 * node_degree * comm_degree / m2)
    }

    fn compute_modularity(&self, resolution: f32) -> f64 {
        let m2 = self.total_weight * 2.0;
        let mut modularity = 0.0;

        for (src, tgt, weight) in &self.edges {
            if self.communities[*src] == self.communities[*tgt] {
                let expected = (self.degrees[*src] * self.degrees[*tgt]) / m2;
                modularity += *weight as f64 - resolution as f64 * expected;
            }
        }

        modularity / self.total_weight
    }

    /// Collapses each community into a supernode. Returns the aggregated
    /// level and the mapping from old community id to new node index.
    fn aggregate(&self) -> (Self, HashMap<usize, usize>) {
        let mut comm_list: Vec<usize> = self
            .communities
            .iter()
            .copied()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        comm_list.sort_unstable();

        let remap: HashMap<usize, usize> = comm_list
            .iter()
            .enumerate()
            .map(|(idx, &comm)| (comm, idx))
            .collect();

        let mut edge_weights: HashMap<(usize, usize), f32> = HashMap::new();
        for (src, tgt, weight) in &self.edges {
            let new_src = remap[&self.communities[*src]];
            let new_tgt = remap[&self.communities[*tgt]];

            if new_src != new_tgt {
                let key = (new_src.min(new_tgt), new_src.max(new_tgt));
                *edge_weights.entry(key).or_default() += weight;
            }
        }

        let node_count = comm_list.len();
        let new_edges: Vec<(usize, usize, f32)> = edge_weights
            .into_iter()
            .map(|((src, tgt), weight)| (src, tgt, weight))
            .collect();

        let mut degrees = vec![0.0; node_count];
        let mut total_weight = 0.0;
        for (src, tgt, weight) in &new_edges {
            let w = *weight as f64;
            degrees[*src] += w;
            degrees[*tgt] += w;
            total_weight += w;
        }

        (
            Self {
                node_count,
                communities: (0..node_count).collect(),
                edges: new_edges,
                degrees,
                total_weight,
            },
            remap,
        )
    }
}
