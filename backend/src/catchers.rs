use rocket::{Request, catch, serde::json::Json};
use shared::{ErrorCode, ErrorResponse};

fn message(code: ErrorCode, error: &str) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(code, error))
}

#[catch(400)]
pub fn bad_request(_req: &Request) -> Json<ErrorResponse> {
    message(ErrorCode::InvalidInput, "Invalid request parameters.")
}

#[catch(401)]
pub fn unauthorized(_req: &Request) -> Json<ErrorResponse> {
    message(ErrorCode::Unauthenticated, "You must be logged in.")
}

#[catch(403)]
pub fn forbidden(_req: &Request) -> Json<ErrorResponse> {
    message(ErrorCode::Forbidden, "Access forbidden. Only the poll owner may do this.")
}

#[catch(404)]
pub fn not_found(_req: &Request) -> Json<ErrorResponse> {
    message(ErrorCode::NotFound, "The requested resource was not found.")
}

#[catch(409)]
pub fn conflict(_req: &Request) -> Json<ErrorResponse> {
    message(ErrorCode::DuplicateVote, "You have already voted on this poll.")
}

#[catch(422)]
pub fn unprocessable_entity(req: &Request) -> Json<ErrorResponse> {
    let error_msg = match req.uri().path().segments().last() {
        Some("votes") => "Request body must contain an optionIndex.",
        _ => "Request body must contain a question and a list of options.",
    };
    Json(ErrorResponse::new(ErrorCode::ValidationFailed, error_msg).with_status(422))
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> Json<ErrorResponse> {
    message(ErrorCode::SystemError, "An internal server error occurred.")
}
