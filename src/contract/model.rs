use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Pure user model for the domain layer (no serde).
///
/// The password digest deliberately does not exist on this model; it never
/// leaves the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
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

/// Data for registering a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Partial update data for a user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
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

/// Data for creating a new book. Availability defaults to true when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publisher: String,
    pub published_at: DateTime<Utc>,
    pub is_available: Option<bool>,
}

/// Partial update data for a book.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_available: Option<bool>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.genre.is_none()
            && self.publisher.is_none()
            && self.published_at.is_none()
            && self.is_available.is_none()
    }
}

/// Catalog listing filters. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFilter {
    pub page: u64,
    pub page_size: u64,
    pub genre: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub title: Option<String>,
    pub is_available: Option<bool>,
    pub include_inactive: bool,
    pub published_from: Option<DateTime<Utc>>,
    pub published_to: Option<DateTime<Utc>>,
}

impl Default for BookFilter {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            genre: None,
            author: None,
            publisher: None,
            title: None,
            is_available: None,
            include_inactive: false,
            published_from: None,
            published_to: None,
        }
    }
}

/// One page of the title-only catalog projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookPage {
    pub page: u64,
    pub page_size: u64,
    pub max_page: u64,
    pub total: u64,
    pub titles: Vec<String>,
}

/// Reservation joined with the borrower's name and the book title, as
/// returned by the create/deliver operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationView {
    pub id: Uuid,
    pub user_name: String,
    pub book_title: String,
    pub reserved_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
}

/// Per-book history entry (who reserved it, and when).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookHistoryEntry {
    pub id: Uuid,
    pub user_name: String,
    pub reserved_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
}

/// Per-user history entry (what they reserved, and when).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserHistoryEntry {
    pub id: Uuid,
    pub book_title: String,
    pub reserved_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
}
