//! Error Types

use thiserror::Error;

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Domain-level errors shared by server and frontend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Request failed validation
    #[error("{0}")]
    Validation(String),

    /// Checkout form used out of order
    #[error("{0}")]
    Checkout(String),
}
