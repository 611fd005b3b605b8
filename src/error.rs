//! Error types for the studymark library.

use thiserror::Error;

/// Result type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library.
///
/// Parsing and rendering are total and never produce errors; the fallible
/// surface is decoding backend payloads and writing export files, so callers
/// can tell "empty" apart from "failed".
#[derive(Debug, Error)]
pub enum Error {
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
