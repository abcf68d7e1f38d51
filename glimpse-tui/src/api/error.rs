use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// Map a non-success status and its cleaned body to an error
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            404 => ApiError::NotFound(message),
            401 | 403 => ApiError::Unauthorized(message),
            400 => ApiError::BadRequest(message),
            _ => ApiError::Api { status, message },
        }
    }

    /// The message the server sent back, if the failure came from the server
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Api { message, .. }
            | ApiError::NotFound(message)
            | ApiError::Unauthorized(message)
            | ApiError::BadRequest(message) => Some(message),
            ApiError::Network(_) | ApiError::Payload(_) => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
