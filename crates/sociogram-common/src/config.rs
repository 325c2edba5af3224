use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

// --- Constants for Default Configuration ---
pub const DEFAULT_COMMUNITY_ALGORITHM: &str = "greedy";
pub const DEFAULT_COMMUNITY_MAX_ITERATIONS: usize = 100;
pub const DEFAULT_COMMUNITY_MIN_SIZE: usize = 1;
pub const DEFAULT_COMMUNITY_RESOLUTION: f32 = 1.0;

pub const DEFAULT_PREDICTION_PREDICTOR: &str = "resource-allocation";
pub const DEFAULT_PREDICTION_TOP_K: usize = 5;
pub const DEFAULT_PREDICTION_MAX_NODES: usize = 1000;

pub const DEFAULT_EIGENVECTOR_MAX_ITER: usize = 1000;
pub const DEFAULT_EIGENVECTOR_TOLERANCE: f64 = 1e-6;

pub const DEFAULT_REPORT_TOP_NODES: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityConfig {
    /// Detection algorithm: "greedy", "lpa", "weighted-lpa" or "louvain".
    pub algorithm: String,
    pub max_iterations: usize,
    /// Communities smaller than this are dropped from the grouped view.
    pub min_community_size: usize,
    /// Resolution parameter for Louvain.
    pub resolution: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Scoring index: "resource-allocation", "jaccard" or "adamic-adar".
    pub predictor: String,
    pub top_k: usize,
    /// Prediction is skipped entirely for graphs with at least this many nodes.
    pub max_nodes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentralityConfig {
    pub eigenvector_max_iter: usize,
    pub eigenvector_tolerance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub top_nodes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub community: CommunityConfig,
    pub prediction: PredictionConfig,
    pub centrality: CentralityConfig,
    pub report: ReportConfig,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_COMMUNITY_ALGORITHM.into(),
            max_iterations: DEFAULT_COMMUNITY_MAX_ITERATIONS,
            min_community_size: DEFAULT_COMMUNITY_MIN_SIZE,
            resolution: DEFAULT_COMMUNITY_RESOLUTION,
        }
    }
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            predictor: DEFAULT_PREDICTION_PREDICTOR.into(),
            top_k: DEFAULT_PREDICTION_TOP_K,
            max_nodes: DEFAULT_PREDICTION_MAX_NODES,
        }
    }
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            eigenvector_max_iter: DEFAULT_EIGENVECTOR_MAX_ITER,
            eigenvector_tolerance: DEFAULT_EIGENVECTOR_TOLERANCE,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_nodes: DEFAULT_REPORT_TOP_NODES,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            community: CommunityConfig::default(),
            prediction: PredictionConfig::default(),
            centrality: CentralityConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            // Default settings
            .set_default("community.algorithm", DEFAULT_COMMUNITY_ALGORITHM)?
            .set_default("community.max_iterations", DEFAULT_COMMUNITY_MAX_ITERATIONS as i64)?
            .set_default("community.min_community_size", DEFAULT_COMMUNITY_MIN_SIZE as i64)?
            .set_default("community.resolution", DEFAULT_COMMUNITY_RESOLUTION as f64)?
            .set_default("prediction.predictor", DEFAULT_PREDICTION_PREDICTOR)?
            .set_default("prediction.top_k", DEFAULT_PREDICTION_TOP_K as i64)?
            .set_default("prediction.max_nodes", DEFAULT_PREDICTION_MAX_NODES as i64)?
            .set_default("centrality.eigenvector_max_iter", DEFAULT_EIGENVECTOR_MAX_ITER as i64)?
            .set_default("centrality.eigenvector_tolerance", DEFAULT_EIGENVECTOR_TOLERANCE)?
            .set_default("report.top_nodes", DEFAULT_REPORT_TOP_NODES as i64)?
            // File: config.toml
            .add_source(File::with_name("config").required(false))
            // Environment: SOCIOGRAM_COMMUNITY__ALGORITHM=louvain -> community.algorithm=louvain
            .add_source(Environment::with_prefix("SOCIOGRAM").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.community.algorithm, DEFAULT_COMMUNITY_ALGORITHM);
        assert_eq!(cfg.community.max_iterations, DEFAULT_COMMUNITY_MAX_ITERATIONS);
        assert_eq!(cfg.prediction.top_k, DEFAULT_PREDICTION_TOP_K);
        assert_eq!(cfg.prediction.max_nodes, DEFAULT_PREDICTION_MAX_NODES);
        assert_eq!(cfg.centrality.eigenvector_max_iter, DEFAULT_EIGENVECTOR_MAX_ITER);
        assert_eq!(cfg.report.top_nodes, DEFAULT_REPORT_TOP_NODES);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let cfg = AppConfig::default();
        let text = toml::to_string(&cfg).expect("Failed to serialize config");
        let parsed: AppConfig = toml::from_str(&text).expect("Failed to parse config");
        assert_eq!(parsed.community.algorithm, cfg.community.algorithm);
        assert_eq!(parsed.prediction.max_nodes, cfg.prediction.max_nodes);
    }
}
