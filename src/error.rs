//! Error types for the tdlab crate

use thiserror::Error;

/// Main error type for the tdlab crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error(
        "independent order {independent} is below dependent order {dependent} (no independent terms possible)"
    )]
    InvalidBasisOrders { independent: usize, dependent: usize },

    #[error("action {action} is out of range (environment has {num_actions} actions)")]
    InvalidAction { action: usize, num_actions: usize },

    #[error("state has {got} elements but the environment declares dimension {expected}")]
    StateDimensionMismatch { expected: usize, got: usize },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
