use axum::Extension;

use crate::api::rest::dto::{LoginDto, LoginReq, UserDto};
use crate::api::rest::extract::Json;
use crate::api::rest::error::ApiError;
use crate::api::rest::state::AppState;

/// Exchange email/password for a signed bearer token
pub async fn login(
    Extension(state): Extension<AppState>,
    Json(req): Json<LoginReq>,
) -> Result<Json<LoginDto>, ApiError> {
    let (Some(email), Some(password)) = (req.email, req.password) else {
        return Err(ApiError::BadRequest("EMAIL_AND_PASSWORD_REQUIRED"));
    };

    let (token, user) = state.auth.login(&email, &password).await?;

    Ok(Json(LoginDto {
        token,
        user: UserDto::from(user),
    }))
}
