//! Error types for the network core.

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Operand dimensions disagree. Nothing is broadcast or truncated.
    #[error("shape mismatch in {op}: expected {expected}, found {found}")]
    ShapeMismatch {
        op: &'static str,
        expected: String,
        found: String,
    },

    /// Malformed layer-dimension list or layers that don't chain.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// Hyperparameters that can't drive training.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn shape(
        op: &'static str,
        expected: impl ToString,
        found: impl ToString,
    ) -> Error {
        Error::ShapeMismatch {
            op,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Error::ShapeMismatch { .. })
    }
}
