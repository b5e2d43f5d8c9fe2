use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};
use tower_http::trace::TraceLayer;

use crate::api::rest::handlers;
use crate::api::rest::state::AppState;

/// Assemble the full HTTP surface over the shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Users
        .route("/users", post(handlers::users::register))
        .route("/users/{id}", get(handlers::users::get_user))
        .route("/users/{id}", put(handlers::users::update_user))
        .route("/users/{id}", delete(handlers::users::disable_user))
        // Auth
        .route("/auth/login", post(handlers::auth::login))
        // Books
        .route("/books", get(handlers::books::list_books))
        .route("/books", post(handlers::books::create_book))
        .route("/books/{id}", get(handlers::books::get_book))
        .route("/books/{id}", put(handlers::books::update_book))
        .route("/books/{id}", delete(handlers::books::disable_book))
        // Reservations
        .route(
            "/reservations",
            post(handlers::reservations::create_reservation),
        )
        .route(
            "/reservations/{id}/deliver",
            post(handlers::reservations::deliver_reservation),
        )
        .route(
            "/reservations/book/{bookId}",
            get(handlers::reservations::history_by_book),
        )
        .route(
            "/reservations/user/{userId}",
            get(handlers::reservations::history_by_user),
        )
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
