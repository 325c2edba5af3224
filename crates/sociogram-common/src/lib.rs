use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;

pub use error::SociogramError;

fn default_weight() -> f32 {
    1.0
}

/// An undirected connection between two members of the network.
///
/// Graphs are simple: orientation is irrelevant and duplicate pairs collapse,
/// so `(a, b)` and `(b, a)` describe the same edge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(default = "default_weight")]
    pub weight: f32,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::weighted(source, target, 1.0)
    }

    pub fn weighted(source: impl Into<String>, target: impl Into<String>, weight: f32) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
        }
    }

    /// Canonical unordered key, smaller endpoint first.
    pub fn key(&self) -> (&str, &str) {
        if self.source <= self.target {
            (&self.source, &self.target)
        } else {
            (&self.target, &self.source)
        }
    }

    pub fn is_loop(&self) -> bool {
        self.source == self.target
    }
}

/// A link that does not exist in the observed graph but is scored as likely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictedLink {
    pub source: String,
    pub target: String,
    /// Score in [0, 100], rounded to two decimals.
    pub probability: f64,
}

impl PredictedLink {
    pub fn new(source: impl Into<String>, target: impl Into<String>, probability: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            probability,
        }
    }
}
