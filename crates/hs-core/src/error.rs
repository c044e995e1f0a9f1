//! Core error type.
//!
//! Higher crates wrap `CoreError` as one variant of their own enums and
//! translate `KeyNotFound` into a domain error that names the missing key.

use thiserror::Error;

/// The error type for `hs-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A table lookup or removal named a key that was never inserted.
    #[error("key not found")]
    KeyNotFound,

    #[error("invalid clock time {0:?}: expected e.g. \"9:05 AM\"")]
    InvalidTime(String),
}

/// Shorthand result type for `hs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
