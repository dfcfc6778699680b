use thiserror::Error;

/// A dataset that violates the record schema. Raised before any analysis
/// stage runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("record at index {index} has an empty id")]
    EmptyId { index: usize },

    #[error("duplicate record id: '{0}'")]
    DuplicateId(String),

    #[error("record '{id}' has negative {field}: {value}")]
    NegativeCount {
        id: String,
        field: &'static str,
        value: i64,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("unsupported dataset format '{0}'; expected .json or .csv")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
