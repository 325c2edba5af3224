// Analysis Engine
//
// Runs the full pipeline over a graph and assembles the report: structural
// metrics, communities, centrality measures, link predictions, rankings and
// the headline nodes.

use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sociogram_common::config::AppConfig;
use sociogram_common::PredictedLink;
use tracing::info;
use uuid::Uuid;

use crate::centrality::CentralityScores;
use crate::community::{CommunityDetector, DetectionConfig};
use crate::graph::{metrics, SocialGraph};
use crate::predict::LinkPredictor;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphMetrics {
    pub nodes: usize,
    pub edges: usize,
    pub density: f64,
    pub avg_path_length: f64,
    pub modularity: f64,
    pub diameter: u32,
    pub avg_degree: f64,
}

/// Per-node centrality snapshot used in the rankings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRanking {
    pub node: String,
    pub degree: f64,
    pub betweenness: f64,
    pub closeness: f64,
    pub eigenvector: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub nodes: Vec<String>,
    pub edges: Vec<(String, String)>,
    pub metrics: GraphMetrics,
    pub degree_centrality: HashMap<String, f64>,
    pub communities: HashMap<String, usize>,
    pub community_count: usize,
    pub predictions: Vec<PredictedLink>,
    pub top_nodes: Vec<NodeRanking>,
    /// Highest degree centrality, formatted "{node} ({score:.3})".
    pub most_central: String,
    pub highest_betweenness: String,
    pub highest_closeness: String,
}

pub struct AnalysisEngine {
    config: AppConfig,
}

impl AnalysisEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(AppConfig::default())
    }

    pub fn analyze(&self, graph: &SocialGraph) -> Result<AnalysisReport> {
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "analyzing graph"
        );

        let detection = CommunityDetector::new(DetectionConfig::from_app(&self.config.community)?)
            .detect(graph)?;
        let centrality = CentralityScores::compute(graph, &self.config.centrality);
        let predictions = LinkPredictor::from_app(&self.config.prediction)?.predict(graph);

        let mut top_nodes: Vec<NodeRanking> = graph
            .nodes()
            .into_iter()
            .map(|node| NodeRanking {
                degree: centrality.degree.get(&node).copied().unwrap_or(0.0),
                betweenness: centrality.betweenness.get(&node).copied().unwrap_or(0.0),
                closeness: centrality.closeness.get(&node).copied().unwrap_or(0.0),
                eigenvector: centrality.eigenvector.get(&node).copied().unwrap_or(0.0),
                node,
            })
            .collect();
        top_nodes.sort_by(|a, b| {
            b.degree
                .partial_cmp(&a.degree)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.node.cmp(&b.node))
        });
        top_nodes.truncate(self.config.report.top_nodes);

        Ok(AnalysisReport {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            nodes: graph.nodes(),
            edges: graph
                .edges()
                .into_iter()
                .map(|e| (e.source, e.target))
                .collect(),
            metrics: GraphMetrics {
                nodes: graph.node_count(),
                edges: graph.edge_count(),
                density: metrics::density(graph),
                avg_path_length: metrics::average_path_length(graph),
                modularity: detection.modularity,
                diameter: metrics::diameter(graph),
                avg_degree: metrics::average_degree(graph),
            },
            most_central: headline(&centrality.degree),
            highest_betweenness: headline(&centrality.betweenness),
            highest_closeness: headline(&centrality.closeness),
            degree_centrality: centrality.degree,
            communities: detection.node_to_community,
            community_count: detection.num_communities,
            predictions,
            top_nodes,
        })
    }
}

fn headline(scores: &HashMap<String, f64>) -> String {
    match CentralityScores::argmax(scores) {
        Some((node, score)) => format!("{} ({:.3})", node, score),
        None => String::new(),
    }
}

/// Display name for a community index: letters for the first 26, numbers
/// beyond that.
pub fn community_display_name(index: usize) -> String {
    if index < 26 {
        let letter = (b'A' + index as u8) as char;
        format!("Community {}", letter)
    } else {
        format!("Community {}", index + 1)
    }
}

impl AnalysisReport {
    /// Console rendering: one line per node assignment, one per predicted
    /// link, then the summary block.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for node in &self.nodes {
            if let Some(&community) = self.communities.get(node) {
                out.push_str(&format!(
                    "Node {}: {}\n",
                    node,
                    community_display_name(community)
                ));
            }
        }

        for link in &self.predictions {
            out.push_str(&format!(
                "Potential link: {}-{} ({:.2}%)\n",
                link.source, link.target, link.probability
            ));
        }

        out.push_str(&format!(
            "\nNodes: {}  Edges: {}  Communities: {}\n",
            self.metrics.nodes, self.metrics.edges, self.community_count
        ));
        out.push_str(&format!(
            "Density: {:.4}  Avg degree: {:.2}  Avg path length: {:.4}  Diameter: {}\n",
            self.metrics.density,
            self.metrics.avg_degree,
            self.metrics.avg_path_length,
            self.metrics.diameter
        ));
        out.push_str(&format!("Modularity: {:.4}\n", self.metrics.modularity));

        if !self.most_central.is_empty() {
            out.push_str(&format!("Most central: {}\n", self.most_central));
            out.push_str(&format!(
                "Highest betweenness: {}\n",
                self.highest_betweenness
            ));
            out.push_str(&format!("Highest closeness: {}\n", self.highest_closeness));
        }

        out
    }
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
    fn test_report_covers_all_sections() {
        let report = AnalysisEngine::with_defaults().analyze(&ring()).unwrap();

        assert_eq!(report.metrics.nodes, 4);
        assert_eq!(report.metrics.edges, 4);
        assert!((report.metrics.density - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(report.metrics.diameter, 2);
        assert_eq!(report.communities.len(), 4);
        assert_eq!(report.predictions.len(), 2);
        assert_eq!(report.top_nodes.len(), 4);
        // All degrees equal: the smallest label leads the rankings.
        assert_eq!(report.top_nodes[0].node, "1");
        assert_eq!(report.most_central, "1 (0.667)");
    }

    #[test]
    fn test_empty_graph_report() {
        let report = AnalysisEngine::with_defaults()
            .analyze(&SocialGraph::new())
            .unwrap();
        assert_eq!(report.metrics.nodes, 0);
        assert_eq!(report.community_count, 0);
        assert!(report.predictions.is_empty());
        assert!(report.most_central.is_empty());
    }

    #[test]
    fn test_report_serializes() {
        let report = AnalysisEngine::with_defaults().analyze(&ring()).unwrap();
        let json = serde_json::to_string(&report).expect("Failed to serialize report");
        let parsed: AnalysisReport = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(parsed.metrics.nodes, 4);
        assert_eq!(parsed.id, report.id);
    }

    #[test]
    fn test_render_text_shape() {
        let report = AnalysisEngine::with_defaults().analyze(&ring()).unwrap();
        let text = report.render_text();
        assert!(text.contains("Node 1: Community"));
        assert!(text.contains("Potential link: 1-3 (100.00%)"));
        assert!(text.contains("Nodes: 4  Edges: 4"));
    }

    #[test]
    fn test_community_display_names() {
        assert_eq!(community_display_name(0), "Community A");
        assert_eq!(community_display_name(1), "Community B");
        assert_eq!(community_display_name(25), "Community Z");
        assert_eq!(community_display_name(26), "Community 27");
    }
}
