//! Errors from the catalogue API.
//!
//! Kept `Clone` (strings only) so results can ride inside GUI messages.

use thiserror::Error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Content not found: {0}")]
    NotFound(String),

    #[error("Quality not available: {0}")]
    QualityUnavailable(String),

    #[error("Server error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Cannot build request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Short line suitable for the detail page notice.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Could not reach the server. Try again.".to_string(),
            ApiError::NotFound(_) => "This title could not be found.".to_string(),
            ApiError::QualityUnavailable(q) => {
                format!("Quality {q} is not available for this title.")
            }
            ApiError::Server {
                detail: Some(d), ..
            } => d.clone(),
            ApiError::Server { status, .. } => format!("Server error ({status})."),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
            ApiError::InvalidRequest(_) => "That id cannot be looked up.".to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
