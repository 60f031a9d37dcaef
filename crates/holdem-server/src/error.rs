//! Maps the engine's error taxonomy onto HTTP status codes (§7). This is
//! ambient server plumbing, not engine semantics -- `EngineError` itself
//! knows nothing about HTTP.
use actix_web::HttpResponse;
use actix_web::ResponseError;
use actix_web::http::StatusCode;
use holdem_core::EngineError;
use holdem_core::ErrorKind;
use std::fmt;

/// A thin wrapper so `ResponseError` (foreign trait) can be implemented for
/// `EngineError` (foreign type) without violating the orphan rule.
#[derive(Debug)]
pub struct ApiError(pub EngineError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.message())
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::PermissionDenied => StatusCode::FORBIDDEN,
            ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::AlreadyExists => StatusCode::CONFLICT,
            ErrorKind::FailedPrecondition => StatusCode::CONFLICT,
            ErrorKind::ResourceExhausted => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::Aborted => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.0.message(),
        }))
    }
}
