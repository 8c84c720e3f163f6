use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Client-side failures. The engine has no I/O of its own, so every request
/// error leaves the game state untouched.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid player id: {0} (expected 1 or 2)")]
    InvalidPlayer(u32),

    #[error("invalid move: {0:?} (expected rock, paper or scissors)")]
    InvalidMove(String),

    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            ApiError::InvalidPlayer(_)
            | ApiError::InvalidMove(_)
            | ApiError::MalformedBody(_) => actix_web::http::StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_variants_are_client_errors() {
        let errors = [
            ApiError::InvalidPlayer(7),
            ApiError::InvalidMove("lizard".to_string()),
            ApiError::MalformedBody("expected value".to_string()),
        ];
        for err in errors {
            assert_eq!(err.status_code().as_u16(), 400);
        }
    }

    #[test]
    fn test_error_messages_name_the_offending_value() {
        assert!(ApiError::InvalidPlayer(7).to_string().contains('7'));
        assert!(ApiError::InvalidMove("lizard".into()).to_string().contains("lizard"));
    }
}
