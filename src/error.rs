//! Error types for gradebook
//!
//! Engine-level errors (record lookups, grade validation) are returned
//! as explicit `Err` values so presentation callers can recover and
//! render a message instead of crashing.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Gradebook error types
#[derive(Error, Debug)]
pub enum Error {
    /// A referenced course id is absent from the store or snapshot
    #[error("course not found: {0}")]
    RecordNotFound(String),

    /// A proposed grade is outside the closed range [0, 100]
    #[error("invalid grade {0}: must be between 0 and 100")]
    InvalidGrade(u8),

    /// A submitted course failed boundary validation
    #[error("invalid course: {0}")]
    InvalidRecord(String),

    /// Key-value backend failure
    #[error("storage error: {0}")]
    Storage(String),

    /// Stored value failed to round-trip as JSON
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport failure in the client
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code returned by the server
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// The client retry budget ran out without a successful transport
    #[error("retries exhausted after {attempts} attempts: {source}")]
    RetriesExhausted {
        /// Number of attempts made before giving up
        attempts: u32,
        /// The transport error from the final attempt
        source: reqwest::Error,
    },
}
