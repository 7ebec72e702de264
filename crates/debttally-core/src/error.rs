//! Error types for debttally-core

use thiserror::Error;

/// Store-side failures. Aggregation itself has no failure modes on
/// well-formed input; malformed records are handled defensively instead.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("store lock poisoned")]
    StorePoisoned,

    #[error("store error: {message}")]
    Store { message: String },
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
