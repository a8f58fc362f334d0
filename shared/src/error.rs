use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    #[error("Validation failed")]
    ValidationFailed,
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Only the owner may do this")]
    Forbidden,
    #[error("Resource not found")]
    NotFound,
    #[error("Already voted")]
    DuplicateVote,
    #[error("Invalid input provided")]
    InvalidInput,
    #[error("Internal system error")]
    SystemError,
}

impl ErrorCode {
    pub const fn status(self) -> u16 {
        match self {
            ErrorCode::ValidationFailed | ErrorCode::InvalidInput => 400,
            ErrorCode::Unauthenticated => 401,
            ErrorCode::Forbidden => 403,
            ErrorCode::NotFound => 404,
            ErrorCode::DuplicateVote => 409,
            ErrorCode::SystemError => 500,
        }
    }
}

/// JSON body returned for every failed request, by handlers and catchers alike.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub error: String,
    pub status: u16,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self { code, error: error.into(), status: code.status() }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}
