use axum::{extract::FromRequestParts, http::header, http::request::Parts};

use crate::api::rest::error::ApiError;
use crate::api::rest::state::AppState;
use crate::domain::auth::Claims;

/// Extractor for routes behind the bearer check. Pulls the token out of the
/// Authorization header and verifies it against the credential service.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let state = parts
            .extensions
            .get::<AppState>()
            .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("AppState extension missing")))?;

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized("AUTH_TOKEN_REQUIRED"))?;

        let claims = state
            .auth
            .verify_token(token)
            .map_err(|_| ApiError::Unauthorized("INVALID_OR_EXPIRED_TOKEN"))?;

        Ok(AuthUser(claims))
    }
}
