//! Error types for tint-core

use thiserror::Error;
use tint_cad::CadError;

/// Engine errors
#[derive(Debug, Clone, Error)]
pub enum TintError {
    /// Fingerprinting met a curve or surface outside the known taxonomy
    #[error("Unsupported {entity} kind: {kind}")]
    UnsupportedShapeKind { entity: &'static str, kind: String },

    #[error("{what} not found: {key}")]
    NotFound { what: &'static str, key: String },

    #[error("History is empty")]
    EmptyHistory,

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CAD kernel error: {0}")]
    Kernel(#[from] CadError),
}

impl TintError {
    pub(crate) fn not_found(what: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            what,
            key: key.to_string(),
        }
    }
}

/// Result type for engine operations
pub type TintResult<T> = Result<T, TintError>;
