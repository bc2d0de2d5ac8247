use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),
}

impl ClientError {
    /// Map a non-success status to an [`ClientError::Api`] error.
    pub(crate) fn ensure_success(status: reqwest::StatusCode, message: &str) -> Result<()> {
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::Api { status: status.as_u16(), message: message.to_string() })
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
