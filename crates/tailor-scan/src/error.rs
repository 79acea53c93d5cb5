//! Error types for the scan crate.

use thiserror::Error;

/// Errors raised while preparing a scanner.
///
/// Only malformed configuration is an error here. Anything that goes wrong
/// while walking or reading content is a [`ScanWarning`](crate::ScanWarning).
#[derive(Debug, Error)]
pub enum ScanError {
    /// A content pattern is not a valid glob.
    #[error("invalid content glob '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Result type for scanner construction.
pub type Result<T> = std::result::Result<T, ScanError>;
