use thiserror::Error;

use meditrack_core::DomainError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("failed to encode request body: {0}")]
    Encode(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// The request was refused locally before being sent.
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401: the token is missing, expired or rejected.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
