//! Error types

use thiserror::Error;

/// Configuration errors raised when a table or pager is built.
///
/// Runtime interaction never fails: out-of-range navigation is clamped and
/// empty data is a renderable state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Page size must be greater than zero.
    #[error("page size must be greater than zero, got {0}")]
    InvalidPageSize(usize),
    /// Pages are 1-based.
    #[error("page numbers start at 1, got {0}")]
    InvalidPage(usize),
}
