// Link prediction over non-adjacent node pairs.
//
// Scores candidate pairs by a neighborhood index and reports the top
// candidates as percentage-like probabilities. Skipped wholesale for
// graphs at or above the configured node cap.

use std::collections::HashSet;
use std::str::FromStr;

use sociogram_common::config::PredictionConfig;
use sociogram_common::{PredictedLink, SociogramError};
use tracing::debug;

use crate::graph::SocialGraph;

/// Neighborhood similarity index used for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictorKind {
    /// Sum over common neighbors of 1/degree.
    ResourceAllocation,
    /// Shared neighborhood over combined neighborhood.
    Jaccard,
    /// Sum over common neighbors of 1/ln(degree).
    AdamicAdar,
}

impl FromStr for PredictorKind {
    type Err = SociogramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resource-allocation" => Ok(PredictorKind::ResourceAllocation),
            "jaccard" => Ok(PredictorKind::Jaccard),
            "adamic-adar" => Ok(PredictorKind::AdamicAdar),
            other => Err(SociogramError::UnknownAlgorithm(other.to_string())),
        }
    }
}

pub struct LinkPredictor {
    kind: PredictorKind,
    top_k: usize,
    max_nodes: usize,
}

impl LinkPredictor {
    pub fn new(kind: PredictorKind, top_k: usize, max_nodes: usize) -> Self {
        Self {
            kind,
            top_k,
            max_nodes,
        }
    }

    pub fn from_app(config: &PredictionConfig) -> Result<Self, SociogramError> {
        Ok(Self::new(
            config.predictor.parse()?,
            config.top_k,
            config.max_nodes,
        ))
    }

    /// Scores every non-adjacent pair and returns the strongest candidates,
    /// probability descending.
    pub fn predict(&self, graph: &SocialGraph) -> Vec<PredictedLink> {
        let n = graph.node_count();
        if n >= self.max_nodes {
            debug!(nodes = n, cap = self.max_nodes, "skipping link prediction");
            return Vec::new();
        }

        let labels = graph.nodes();
        let neighbor_sets: Vec<(String, HashSet<String>)> = labels
            .iter()
            .map(|label| (label.clone(), graph.neighbors(label).into_iter().collect()))
            .collect();

        let mut predictions = Vec::new();
        for i in 0..neighbor_sets.len() {
            for j in (i + 1)..neighbor_sets.len() {
                let (u, u_neighbors) = &neighbor_sets[i];
                let (v, v_neighbors) = &neighbor_sets[j];
                if u_neighbors.contains(v) {
                    continue;
                }

                let score = self.score(graph, u_neighbors, v_neighbors);
                let probability = (score * 100.0).clamp(0.0, 100.0);
                let probability = (probability * 100.0).round() / 100.0;
                predictions.push(PredictedLink::new(u.clone(), v.clone(), probability));
            }
        }

        predictions.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| (&a.source, &a.target).cmp(&(&b.source, &b.target)))
        });
        predictions.truncate(self.top_k);
        predictions
    }

    fn score(
        &self,
        graph: &SocialGraph,
        u_neighbors: &HashSet<String>,
        v_neighbors: &HashSet<String>,
    ) -> f64 {
        let common = u_neighbors.intersection(v_neighbors);
        match self.kind {
            PredictorKind::ResourceAllocation => common
                .map(|w| {
                    let degree = graph.degree(w);
                    if degree > 0 {
                        1.0 / degree as f64
                    } else {
                        0.0
                    }
                })
                .sum(),
            PredictorKind::Jaccard => {
                let union = u_neighbors.union(v_neighbors).count();
                if union == 0 {
                    0.0
                } else {
                    common.count() as f64 / union as f64
                }
            }
            PredictorKind::AdamicAdar => common
                .map(|w| {
                    let degree = graph.degree(w) as f64;
                    // A common neighbor always has degree >= 2.
                    1.0 / degree.ln()
                })
                .sum(),
        }
    }
}
