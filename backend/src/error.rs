use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use shared::{ErrorCode, ErrorResponse, ValidationError};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum PollError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("You must be logged in")]
    Unauthenticated,
    #[error("You can only modify your own polls")]
    NotOwner,
    #[error("Poll not found")]
    NotFound,
    #[error("You have already voted on this poll")]
    DuplicateVote,
    #[error("Invalid poll ID")]
    InvalidId,
    #[error("Store error: {0}")]
    Store(String),
}

impl PollError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PollError::Validation(_) => ErrorCode::ValidationFailed,
            PollError::Unauthenticated => ErrorCode::Unauthenticated,
            PollError::NotOwner => ErrorCode::Forbidden,
            PollError::NotFound => ErrorCode::NotFound,
            PollError::DuplicateVote => ErrorCode::DuplicateVote,
            PollError::InvalidId => ErrorCode::InvalidInput,
            PollError::Store(_) => ErrorCode::SystemError,
        }
    }

    fn public_message(&self) -> String {
        match self {
            PollError::Store(_) => "Something went wrong, please try again".into(),
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for PollError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation => PollError::DuplicateVote,
            StoreError::MissingPoll => PollError::NotFound,
            StoreError::Database(msg) => PollError::Store(msg),
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for PollError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let code = self.code();
        let status = Status::from_code(code.status()).unwrap_or(Status::InternalServerError);
        let body = Json(ErrorResponse::new(code, self.public_message()));

        rocket::Response::build_from(body.respond_to(req)?)
            .status(status)
            .ok()
    }
}
