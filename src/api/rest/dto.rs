use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{
    Book, BookHistoryEntry, BookPage, ReservationView, User, UserHistoryEntry,
};

/// REST DTO for user representation. The password digest is not part of any
/// DTO shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub can_create_books: bool,
    pub can_update_books: bool,
    pub can_disable_books: bool,
    pub can_update_users: bool,
    pub can_disable_users: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration request. Fields are optional so missing input maps to a 400
/// with a named code instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserReq {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Partial user update request
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserReq {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoginReq {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginDto {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publisher: String,
    pub published_at: DateTime<Utc>,
    pub is_available: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookReq {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookReq {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_available: Option<bool>,
}

/// Catalog listing query parameters
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListBooksQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub genre: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub title: Option<String>,
    pub is_available: Option<bool>,
    pub include_inactive: Option<bool>,
    pub published_from: Option<DateTime<Utc>>,
    pub published_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetBookQuery {
    pub include_inactive: Option<bool>,
}

/// Title-only projection entry in the catalog listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookTitleDto {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPageDto {
    pub page: u64,
    pub page_size: u64,
    pub max_page: u64,
    pub total: u64,
    pub books: Vec<BookTitleDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationReq {
    pub book_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    pub id: Uuid,
    pub user_name: String,
    pub book_title: String,
    pub reserved_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookHistoryDto {
    pub id: Uuid,
    pub user_name: String,
    pub reserved_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserHistoryDto {
    pub id: Uuid,
    pub book_title: String,
    pub reserved_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_active: user.is_active,
            can_create_books: user.can_create_books,
            can_update_books: user.can_update_books,
            can_disable_books: user.can_disable_books,
            can_update_users: user.can_update_users,
            can_disable_users: user.can_disable_users,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            genre: book.genre,
            publisher: book.publisher,
            published_at: book.published_at,
            is_available: book.is_available,
            is_active: book.is_active,
            created_at: book.created_at,
        }
    }
}

impl From<BookPage> for BookPageDto {
    fn from(page: BookPage) -> Self {
        Self {
            page: page.page,
            page_size: page.page_size,
            max_page: page.max_page,
            total: page.total,
            books: page
                .titles
                .into_iter()
                .map(|title| BookTitleDto { title })
                .collect(),
        }
    }
}

impl From<ReservationView> for ReservationDto {
    fn from(view: ReservationView) -> Self {
        Self {
            id: view.id,
            user_name: view.user_name,
            book_title: view.book_title,
            reserved_at: view.reserved_at,
            delivered_at: view.delivered_at,
        }
    }
}

impl From<BookHistoryEntry> for BookHistoryDto {
    fn from(entry: BookHistoryEntry) -> Self {
        Self {
            id: entry.id,
            user_name: entry.user_name,
            reserved_at: entry.reserved_at,
            delivered_at: entry.delivered_at,
        }
    }
}

impl From<UserHistoryEntry> for UserHistoryDto {
    fn from(entry: UserHistoryEntry) -> Self {
        Self {
            id: entry.id,
            book_title: entry.book_title,
            reserved_at: entry.reserved_at,
            delivered_at: entry.delivered_at,
        }
    }
}
