use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: Uuid },

    #[error("User with email '{email}' already exists")]
    EmailAlreadyExists { email: String },

    #[error("Book not found: {id}")]
    BookNotFound { id: Uuid },

    #[error("Book is not available: {id}")]
    BookNotAvailable { id: Uuid },

    #[error("Reservation not found: {id}")]
    ReservationNotFound { id: Uuid },

    #[error("Reservation already delivered: {id}")]
    AlreadyDelivered { id: Uuid },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Credential service error: {message}")]
    Credential { message: String },
}

impl DomainError {
    pub fn user_not_found(id: Uuid) -> Self {
        Self::UserNotFound { id }
    }

    pub fn email_already_exists(email: impl Into<String>) -> Self {
        Self::EmailAlreadyExists {
            email: email.into(),
        }
    }

    pub fn book_not_found(id: Uuid) -> Self {
        Self::BookNotFound { id }
    }

    pub fn book_not_available(id: Uuid) -> Self {
        Self::BookNotAvailable { id }
    }

    pub fn reservation_not_found(id: Uuid) -> Self {
        Self::ReservationNotFound { id }
    }

    pub fn already_delivered(id: Uuid) -> Self {
        Self::AlreadyDelivered { id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn credential(message: impl Into<String>) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::database(err.to_string())
    }
}
