//! Error types for pathlab.

use thiserror::Error;

/// Failures at the edges of the application. The grid, search and maze code
/// never fail; misuse there is a no-op.
#[derive(Error, Debug)]
pub enum LabError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("terminal error: {0}")]
    Terminal(String),
}

impl From<Box<dyn std::error::Error>> for LabError {
    fn from(e: Box<dyn std::error::Error>) -> Self {
        LabError::Terminal(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LabError>;
