//! Error types for the SPARQL client.

use thiserror::Error;

/// Result type alias for SPARQL client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for SPARQL client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    /// The store answered with a non-success status.
    #[error("store answered {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the store.
        body: String,
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
                        .with_message("Connection to triple store failed")
                        .with_source(e)
                } else {
                    weft_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Endpoint(e) => weft_core::Error::configuration()
                .with_message(e.to_string())
                .with_source(e),
            err @ Error::Status { .. } => weft_core::Error::external_error()
                .with_message(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use weft_core::ErrorKind;

    use super::*;

    #[test]
    fn test_status_maps_to_external_error() {
        let err: weft_core::Error = Error::Status {
            status: 500,
            body: "boom".to_owned(),
        }
        .into();

        assert_eq!(err.kind(), ErrorKind::ExternalError);
        assert_eq!(err.message.as_deref(), Some("store answered 500: boom"));
    }

    #[test]
    fn test_endpoint_maps_to_configuration() {
        let parse = url::Url::parse("not a url").unwrap_err();
        let err: weft_core::Error = Error::from(parse).into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
