use axum::{http::StatusCode, Extension};
use uuid::Uuid;

use crate::api::rest::auth::AuthUser;
use crate::api::rest::extract::{Json, Path};
use crate::api::rest::dto::{
    BookHistoryDto, CreateReservationReq, ReservationDto, UserHistoryDto,
};
use crate::api::rest::error::ApiError;
use crate::api::rest::state::AppState;
use crate::domain::auth::Capability;

/// Reserve a book for the authenticated user
pub async fn create_reservation(
    AuthUser(claims): AuthUser,
    Extension(state): Extension<AppState>,
    Json(req): Json<CreateReservationReq>,
) -> Result<(StatusCode, Json<ReservationDto>), ApiError> {
    let Some(book_id) = req.book_id else {
        return Err(ApiError::BadRequest("BOOK_ID_REQUIRED"));
    };

    let view = state.reservations.create(claims.sub, book_id).await?;
    Ok((StatusCode::CREATED, Json(ReservationDto::from(view))))
}

/// Mark a reservation as delivered, restoring the book's availability
pub async fn deliver_reservation(
    AuthUser(_claims): AuthUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReservationDto>, ApiError> {
    let view = state.reservations.deliver(id).await?;
    Ok(Json(ReservationDto::from(view)))
}

/// Reservation history of a book, newest first
pub async fn history_by_book(
    AuthUser(_claims): AuthUser,
    Extension(state): Extension<AppState>,
    Path(book_id): Path<Uuid>,
) -> Result<Json<Vec<BookHistoryDto>>, ApiError> {
    let history = state.reservations.history_by_book(book_id).await?;
    Ok(Json(history.into_iter().map(BookHistoryDto::from).collect()))
}

/// Reservation history of a user: self-access or canUpdateUsers
pub async fn history_by_user(
    AuthUser(claims): AuthUser,
    Extension(state): Extension<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<UserHistoryDto>>, ApiError> {
    if !claims.allows_self_or(user_id, Capability::UpdateUsers) {
        return Err(ApiError::Forbidden);
    }

    let history = state.reservations.history_by_user(user_id).await?;
    Ok(Json(history.into_iter().map(UserHistoryDto::from).collect()))
}
