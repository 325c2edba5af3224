use thiserror::Error;

/// Domain errors for graph loading and analysis.
#[derive(Debug, Error)]
pub enum SociogramError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} contains no usable edges")]
    EmptyEdgeList { path: String },

    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error("self-loops are not allowed: '{0}'")]
    SelfLoop(String),

    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
