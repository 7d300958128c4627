//! Error types for the engine HTTP client.

use thiserror::Error;

/// Result type alias for engine client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for engine client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// The engine answered with a non-success status.
    #[error("engine answered {status} for {resource}")]
    Status {
        /// Requested resource path.
        resource: String,
        /// HTTP status code.
        status: u16,
    },
}

impl From<Error> for weft_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    weft_core::Error::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    weft_core::Error::network_error()
                        .with_message("Connection to execution engine failed")
                        .with_source(e)
                } else if e.is_decode() {
                    weft_core::Error::serialization()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    weft_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            err @ Error::Status { .. } => {
                weft_core::Error::external_error().with_message(err.to_string())
            }
        }
    }
}
