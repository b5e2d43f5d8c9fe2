pub mod auth;
pub mod books;
pub mod reservations;
pub mod users;

use axum::response::Json;

use crate::api::rest::dto::HealthDto;

/// Liveness probe
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}
