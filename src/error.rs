use std::path::PathBuf;
use thiserror::Error;

/// Error types for the epochkmeans library
#[derive(Error, Debug)]
pub enum KMeansError {
    /// Two vectors of unequal length were combined
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Prediction was requested without usable centroids
    #[error("Model has no usable centroids. Call fit() first.")]
    EmptyModel,

    /// Invalid k, epochs, run count or input shape
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A cluster received no members under `EmptyClusterPolicy::Fail`
    #[error("Cluster {cluster} received no observations in epoch {epoch}")]
    EmptyCluster { cluster: usize, epoch: usize },

    /// Input file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A token in the input is not a valid number
    #[error("Parse error on line {line}: {token:?} is not a valid number")]
    Parse { line: usize, token: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Convenient alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, KMeansError>;
