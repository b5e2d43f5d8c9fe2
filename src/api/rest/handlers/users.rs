use axum::{http::StatusCode, Extension};
use tracing::info;
use uuid::Uuid;

use crate::api::rest::auth::AuthUser;
use crate::api::rest::extract::{Json, Path};
use crate::api::rest::dto::{RegisterUserReq, UpdateUserReq, UserDto};
use crate::api::rest::error::ApiError;
use crate::api::rest::state::AppState;
use crate::contract::model::{NewUser, UserPatch};
use crate::domain::auth::Capability;

/// Register a new user (public)
pub async fn register(
    Extension(state): Extension<AppState>,
    Json(req): Json<RegisterUserReq>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let (Some(name), Some(email), Some(password)) = (req.name, req.email, req.password) else {
        return Err(ApiError::BadRequest("NAME_EMAIL_PASSWORD_REQUIRED"));
    };

    info!(email = %email, "registering user");

    let user = state
        .users
        .register(NewUser {
            name,
            email,
            password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

/// Get a user by ID
pub async fn get_user(
    AuthUser(_claims): AuthUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserDto>, ApiError> {
    let user = state.users.get_by_id(id, false).await?;
    Ok(Json(UserDto::from(user)))
}

/// Update a user: self-access or canUpdateUsers
pub async fn update_user(
    AuthUser(claims): AuthUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserReq>,
) -> Result<Json<UserDto>, ApiError> {
    if !claims.allows_self_or(id, Capability::UpdateUsers) {
        return Err(ApiError::Forbidden);
    }

    if req.name.is_none() && req.email.is_none() {
        return Err(ApiError::BadRequest("NOTHING_TO_UPDATE"));
    }

    let user = state
        .users
        .update(
            id,
            UserPatch {
                name: req.name,
                email: req.email,
            },
        )
        .await?;

    Ok(Json(UserDto::from(user)))
}

/// Soft-disable a user: self-access or canDisableUsers
pub async fn disable_user(
    AuthUser(claims): AuthUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserDto>, ApiError> {
    if !claims.allows_self_or(id, Capability::DisableUsers) {
        return Err(ApiError::Forbidden);
    }

    let user = state.users.disable(id).await?;
    Ok(Json(UserDto::from(user)))
}
