use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::domain::error::DomainError;

/// Boundary error: every failure a handler can surface, carrying the stable
/// string code the wire format exposes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("FORBIDDEN")]
    Forbidden,
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use ApiError::*;

        let (status, code) = match &self {
            BadRequest(code) => (StatusCode::BAD_REQUEST, *code),
            Unauthorized(code) => (StatusCode::UNAUTHORIZED, *code),
            Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            NotFound(code) => (StatusCode::NOT_FOUND, *code),
            Conflict(code) => (StatusCode::CONFLICT, *code),
            Internal(err) => {
                error!("internal error: {err:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR")
            }
        };

        (status, Json(json!({ "error": code }))).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UserNotFound { .. } => Self::NotFound("USER_NOT_FOUND"),
            DomainError::EmailAlreadyExists { .. } => Self::Conflict("EMAIL_ALREADY_EXISTS"),
            DomainError::BookNotFound { .. } => Self::NotFound("BOOK_NOT_FOUND"),
            DomainError::BookNotAvailable { .. } => Self::Conflict("BOOK_NOT_AVAILABLE"),
            DomainError::ReservationNotFound { .. } => Self::NotFound("RESERVATION_NOT_FOUND"),
            // Per the API contract a duplicate deliver is a 400, not a 409.
            DomainError::AlreadyDelivered { .. } => Self::BadRequest("ALREADY_DELIVERED"),
            DomainError::InvalidCredentials => Self::Unauthorized("INVALID_CREDENTIALS"),
            err @ (DomainError::Database { .. } | DomainError::Credential { .. }) => {
                Self::Internal(anyhow::Error::new(err))
            }
        }
    }
}
