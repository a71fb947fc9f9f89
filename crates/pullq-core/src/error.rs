use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Internal invariant failed: {0}")]
    Invariant(String),
}
