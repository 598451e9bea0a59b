//! Shared error types for the analysis pipeline

use thiserror::Error;

/// Main error type for depmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed required input (empty identity, bad dataset entry)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors, rejected at load time
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An edge endpoint that is not a vertex of the graph
    #[error("Unknown project: {path}")]
    UnknownProject { path: String },

    /// A scoring metric outside the normalized 0-100 range
    #[error("Invalid {metric} metric for {project}: {value} (expected 0-100)")]
    InvalidMetric {
        project: String,
        metric: &'static str,
        value: f64,
    },

    /// Values that do not reconcile with each other
    #[error("Inconsistent analysis state: {0}")]
    Inconsistent(String),

    /// The caller requested cancellation
    #[error("Analysis cancelled")]
    Cancelled,

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an input-validation error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an unknown-project error for an edge endpoint
    pub fn unknown_project(path: impl Into<String>) -> Self {
        Self::UnknownProject { path: path.into() }
    }

    /// True when the error signals caller-initiated cancellation rather than
    /// a failure of the input or the computation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
