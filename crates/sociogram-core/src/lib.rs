pub mod centrality;
pub mod community;
pub mod engine;
pub mod graph;
pub mod ingest;
pub mod predict;
pub mod walkthrough;

pub use centrality::CentralityScores;
pub use community::{Algorithm, CommunityDetector, CommunityResult, DetectionConfig};
pub use engine::{AnalysisEngine, AnalysisReport};
pub use graph::SocialGraph;
pub use ingest::load_graph_from_csv;
pub use predict::{LinkPredictor, PredictorKind};

// Re-export common types for convenience
pub use sociogram_common::{config::AppConfig, Edge, PredictedLink, SociogramError};
