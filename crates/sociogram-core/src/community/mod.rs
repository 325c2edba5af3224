// Community Detection Module
//
// Provides multiple community detection algorithms:
// - Greedy modularity agglomeration (default)
// - LPA and weighted LPA
// - Louvain

mod greedy;
mod louvain;
mod lpa;

use std::collections::HashMap;
use std::str::FromStr;

use anyhow::Result;
use sociogram_common::config::CommunityConfig;
use sociogram_common::SociogramError;

use crate::graph::SocialGraph;

/// Community detection algorithm type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Greedy modularity agglomeration (Clauset-Newman-Moore).
    GreedyModularity,
    /// Label propagation (fast, suited to large graphs).
    LabelPropagation,
    /// Label propagation with edge weights.
    WeightedLpa,
    /// Louvain modularity optimization.
    Louvain,
}

impl FromStr for Algorithm {
    type Err = SociogramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greedy" => Ok(Algorithm::GreedyModularity),
            "lpa" => Ok(Algorithm::LabelPropagation),
            "weighted-lpa" => Ok(Algorithm::WeightedLpa),
            "louvain" => Ok(Algorithm::Louvain),
            other => Err(SociogramError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Detection configuration.
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    pub algorithm: Algorithm,
    pub max_iterations: usize,
    pub min_community_size: usize,
    /// Resolution parameter for Louvain.
    pub resolution: f32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::GreedyModularity,
            max_iterations: 100,
            min_community_size: 1,
            resolution: 1.0,
        }
    }
}

impl DetectionConfig {
    pub fn from_app(config: &CommunityConfig) -> Result<Self, SociogramError> {
        Ok(Self {
            algorithm: config.algorithm.parse()?,
            max_iterations: config.max_iterations,
            min_community_size: config.min_community_size,
            resolution: config.resolution,
        })
    }
}

/// Community detection result.
#[derive(Debug)]
pub struct CommunityResult {
    /// Node label to community index. Covers every node.
    pub node_to_community: HashMap<String, usize>,
    /// Member lists per community index, largest community first. Communities
    /// below `min_community_size` are dropped from this view only.
    pub communities: Vec<Vec<String>>,
    /// Modularity of the full partition (quality measure).
    pub modularity: f64,
    pub num_communities: usize,
}

pub struct CommunityDetector {
    config: DetectionConfig,
}

impl CommunityDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Runs detection over the whole graph.
    pub fn detect(&self, graph: &SocialGraph) -> Result<CommunityResult> {
        if graph.node_count() == 0 {
            return Ok(CommunityResult {
                node_to_community: HashMap::new(),
                communities: Vec::new(),
                modularity: 0.0,
                num_communities: 0,
            });
        }

        let membership = match self.config.algorithm {
            Algorithm::GreedyModularity => greedy::detect(graph),
            Algorithm::LabelPropagation => lpa::detect(graph, self.config.max_iterations, false),
            Algorithm::WeightedLpa => lpa::detect(graph, self.config.max_iterations, true),
            Algorithm::Louvain => {
                louvain::detect(graph, self.config.max_iterations, self.config.resolution)
            }
        };

        let score = modularity(graph, &membership);
        Ok(self.assemble(graph, &membership, score))
    }

    /// Renumbers raw membership into stable community indices and groups
    /// members, largest community first.
    fn assemble(&self, graph: &SocialGraph, membership: &[usize], score: f64) -> CommunityResult {
        let mut groups: HashMap<usize, Vec<String>> = HashMap::new();
        for idx in graph.inner().node_indices() {
            groups
                .entry(membership[idx.index()])
                .or_default()
                .push(graph.label_of(idx).to_string());
        }

        let mut ordered: Vec<Vec<String>> = groups.into_values().collect();
        for members in &mut ordered {
            members.sort();
        }
        ordered.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a[0].cmp(&b[0])));

        let mut node_to_community = HashMap::new();
        for (community_id, members) in ordered.iter().enumerate() {
            for member in members {
                node_to_community.insert(member.clone(), community_id);
            }
        }

        let communities: Vec<Vec<String>> = ordered
            .into_iter()
            .filter(|members| members.len() >= self.config.min_community_size)
            .collect();
        let num_communities = communities.len();

        CommunityResult {
            node_to_community,
            communities,
            modularity: score,
            num_communities,
        }
    }
}

/// Modularity of a partition: sum over communities of
/// in-degree/(2m) - (total-degree/(2m))^2, with weighted degrees.
pub fn modularity(graph: &SocialGraph, membership: &[usize]) -> f64 {
    let edges = graph.index_edges();
    let total_weight: f64 = edges.iter().map(|(_, _, w)| *w as f64).sum();
    if total_weight == 0.0 {
        return 0.0;
    }
    let m2 = total_weight * 2.0;

    let mut internal: HashMap<usize, f64> = HashMap::new();
    let mut degree: HashMap<usize, f64> = HashMap::new();
    for (src, tgt, weight) in &edges {
        let w = *weight as f64;
        *degree.entry(membership[*src]).or_default() += w;
        *degree.entry(membership[*tgt]).or_default() += w;
        if membership[*src] == membership[*tgt] {
            *internal.entry(membership[*src]).or_default() += w;
        }
    }

    degree
        .iter()
        .map(|(community, deg)| {
            let inside = internal.get(community).copied().unwrap_or(0.0);
            (2.0 * inside) / m2 - (deg / m2).powi(2)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sociogram_common::Edge;

    fn two_triangles() -> SocialGraph {
        // Two triangles joined by a single bridge edge.
        SocialGraph::from_edges(&[
            Edge::new("a", "b"),
            Edge::new("b", "c"),
            Edge::new("c", "a"),
            Edge::new("x", "y"),
            Edge::new("y", "z"),
            Edge::new("z", "x"),
            Edge::new("c", "x"),
        ])
    }

    #[test]
    fn test_algorithm_parsing() {
        assert_eq!("greedy".parse::<Algorithm>().unwrap(), Algorithm::GreedyModularity);
        assert_eq!("lpa".parse::<Algorithm>().unwrap(), Algorithm::LabelPropagation);
        assert_eq!("weighted-lpa".parse::<Algorithm>().unwrap(), Algorithm::WeightedLpa);
        assert_eq!("louvain".parse::<Algorithm>().unwrap(), Algorithm::Louvain);
        assert!("spectral".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_greedy_separates_triangles() {
        let graph = two_triangles();
        let detector = CommunityDetector::new(DetectionConfig::default());
        let result = detector.detect(&graph).unwrap();

        assert_eq!(result.num_communities, 2);
        assert!(result.modularity > 0.0);
        let (a, b, c) = (
            result.node_to_community["a"],
            result.node_to_community["b"],
            result.node_to_community["c"],
        );
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_ne!(a, result.node_to_community["x"]);
        assert_eq!(
            result.node_to_community["x"],
            result.node_to_community["z"]
        );
    }

    #[test]
    fn test_every_node_is_assigned() {
        let graph = two_triangles();
        for algorithm in ["greedy", "lpa", "weighted-lpa", "louvain"] {
            let config = DetectionConfig {
                algorithm: algorithm.parse().unwrap(),
                ..Default::default()
            };
            let result = CommunityDetector::new(config).detect(&graph).unwrap();
            assert_eq!(result.node_to_community.len(), graph.node_count(), "{algorithm}");
            assert!(result.modularity >= -1.0 && result.modularity <= 1.0, "{algorithm}");
        }
    }

    #[test]
    fn test_empty_graph() {
        let detector = CommunityDetector::new(DetectionConfig::default());
        let result = detector.detect(&SocialGraph::new()).unwrap();
        assert_eq!(result.num_communities, 0);
        assert_eq!(result.modularity, 0.0);
    }

    #[test]
    fn test_modularity_of_known_partition() {
        // Ring of four split into adjacent pairs: Q is exactly 0.
        let graph = SocialGraph::from_edges(&[
            Edge::new("1", "2"),
            Edge::new("2", "3"),
            Edge::new("3", "4"),
            Edge::new("4", "1"),
        ]);
        let membership: Vec<usize> = graph
            .inner()
            .node_indices()
            .map(|idx| match graph.label_of(idx) {
                "1" | "2" => 0,
                _ => 1,
            })
            .collect();
        assert!(modularity(&graph, &membership).abs() < 1e-12);
    }

    #[test]
    fn test_min_size_filters_grouped_view_only() {
        let mut graph = two_triangles();
        graph.add_node("hermit");
        let config = DetectionConfig {
            min_community_size: 2,
            ..Default::default()
        };
        let result = CommunityDetector::new(config).detect(&graph).unwrap();

        // The singleton disappears from the groups but keeps its assignment.
        assert!(result.communities.iter().all(|c| c.len() >= 2));
        assert!(result.node_to_community.contains_key("hermit"));
    }
}
