//! Error types for the tracking client.

use scorersync_core::BackendError;
use thiserror::Error;

/// Errors that can occur when talking to the tracking service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<ClientError> for BackendError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) => BackendError::Transport(e.to_string()),
            ClientError::Api { status, message } => BackendError::Api { status, message },
            ClientError::Serialization(msg) => BackendError::Serialization(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_maps_to_backend_api() {
        let err = ClientError::Api {
            status: 403,
            message: "permission denied".to_string(),
        };
        match BackendError::from(err) {
            BackendError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "permission denied");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
