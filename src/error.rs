//! Error types for the solrkit library.
//!
//! All fallible operations in this crate return [`Result`], whose error type
//! is the [`SolrKitError`] enum.
//!
//! # Examples
//!
//! ```
//! use solrkit::error::{Result, SolrKitError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SolrKitError::invalid_field_name("missing 'prefix_' head"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for solrkit operations.
///
/// Recoverable per-entry conditions (a malformed spatial option, a grouping
/// request on a fulltext field) are not errors; they are skipped and reported
/// as assembler warnings instead.
#[derive(Error, Debug)]
pub enum SolrKitError {
    /// A field name does not have the expected `prefix_` shape.
    #[error("Invalid field name: {0}")]
    InvalidFieldName(String),

    /// A query references a logical field absent from the field map.
    #[error("Unsupported field: {0}")]
    UnsupportedField(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An HTTP-level failure surfaced by the enclosing transport.
    #[error("Transport error ({status}): {message}")]
    Transport {
        /// HTTP status code reported by the server, 0 when none was received.
        status: u16,
        /// Error message from the transport or server.
        message: String,
    },

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with [`SolrKitError`].
pub type Result<T> = std::result::Result<T, SolrKitError>;

impl SolrKitError {
    /// Create a new invalid field name error.
    pub fn invalid_field_name<S: Into<String>>(msg: S) -> Self {
        SolrKitError::InvalidFieldName(msg.into())
    }

    /// Create a new unsupported field error.
    pub fn unsupported_field<S: Into<String>>(msg: S) -> Self {
        SolrKitError::UnsupportedField(msg.into())
    }

    /// Create a new transport error.
    pub fn transport<S: Into<String>>(status: u16, message: S) -> Self {
        SolrKitError::Transport {
            status,
            message: message.into(),
        }
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SolrKitError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SolrKitError::invalid_field_name("no prefix");
        assert_eq!(error.to_string(), "Invalid field name: no prefix");

        let error = SolrKitError::unsupported_field("body");
        assert_eq!(error.to_string(), "Unsupported field: body");

        let error = SolrKitError::transport(503, "Service Unavailable");
        assert_eq!(
            error.to_string(),
            "Transport error (503): Service Unavailable"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = SolrKitError::from(json_error);

        match error {
            SolrKitError::Json(_) => {}
            _ => panic!("Expected JSON error variant"),
        }
    }
}
