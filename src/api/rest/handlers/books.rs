use axum::{http::StatusCode, Extension};
use tracing::info;
use uuid::Uuid;

use crate::api::rest::auth::AuthUser;
use crate::api::rest::extract::{Json, Path, Query};
use crate::api::rest::dto::{
    BookDto, BookPageDto, CreateBookReq, GetBookQuery, ListBooksQuery, UpdateBookReq,
};
use crate::api::rest::error::ApiError;
use crate::api::rest::state::AppState;
use crate::contract::model::{BookFilter, BookPatch, NewBook};
use crate::domain::auth::Capability;

/// Filtered, paginated, title-only catalog listing (public)
pub async fn list_books(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Result<Json<BookPageDto>, ApiError> {
    let defaults = BookFilter::default();
    let filter = BookFilter {
        page: query.page.unwrap_or(defaults.page),
        page_size: query.page_size.unwrap_or(defaults.page_size),
        genre: query.genre,
        author: query.author,
        publisher: query.publisher,
        title: query.title,
        is_available: query.is_available,
        include_inactive: query.include_inactive.unwrap_or(false),
        published_from: query.published_from,
        published_to: query.published_to,
    };

    let page = state.books.list(filter).await?;
    Ok(Json(BookPageDto::from(page)))
}

/// Get a book by ID (public)
pub async fn get_book(
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<GetBookQuery>,
) -> Result<Json<BookDto>, ApiError> {
    let book = state
        .books
        .get_by_id(id, query.include_inactive.unwrap_or(false))
        .await?;

    Ok(Json(BookDto::from(book)))
}

/// Create a book: requires canCreateBooks
pub async fn create_book(
    AuthUser(claims): AuthUser,
    Extension(state): Extension<AppState>,
    Json(req): Json<CreateBookReq>,
) -> Result<(StatusCode, Json<BookDto>), ApiError> {
    if !claims.allows(Capability::CreateBooks) {
        return Err(ApiError::Forbidden);
    }

    let (Some(title), Some(author), Some(genre), Some(publisher), Some(published_at)) =
        (req.title, req.author, req.genre, req.publisher, req.published_at)
    else {
        return Err(ApiError::BadRequest("MISSING_REQUIRED_FIELDS"));
    };

    info!(title = %title, "creating book");

    let book = state
        .books
        .create(NewBook {
            title,
            author,
            genre,
            publisher,
            published_at,
            is_available: req.is_available,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(BookDto::from(book))))
}

/// Patch a book: requires canUpdateBooks
pub async fn update_book(
    AuthUser(claims): AuthUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBookReq>,
) -> Result<Json<BookDto>, ApiError> {
    if !claims.allows(Capability::UpdateBooks) {
        return Err(ApiError::Forbidden);
    }

    let patch = BookPatch {
        title: req.title,
        author: req.author,
        genre: req.genre,
        publisher: req.publisher,
        published_at: req.published_at,
        is_available: req.is_available,
    };

    if patch.is_empty() {
        return Err(ApiError::BadRequest("NOTHING_TO_UPDATE"));
    }

    let book = state.books.update(id, patch).await?;
    Ok(Json(BookDto::from(book)))
}

/// Soft-disable a book: requires canDisableBooks
pub async fn disable_book(
    AuthUser(claims): AuthUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookDto>, ApiError> {
    if !claims.allows(Capability::DisableBooks) {
        return Err(ApiError::Forbidden);
    }

    let book = state.books.disable(id).await?;
    Ok(Json(BookDto::from(book)))
}
