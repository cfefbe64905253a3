use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success HTTP status.
    #[error("API returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("failed to encode request body: {0}")]
    Encode(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("credentials error: {0}")]
    Credentials(String),

    #[error("invalid endpoint: {0}")]
    Endpoint(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// HTTP 403 and 404 both mean the resource is missing or not visible to the caller.
    pub fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(403 | 404))
    }
}
