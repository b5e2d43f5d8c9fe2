use crate::contract::model::{Book, User};
use crate::infra::storage::{books, users};

/// Convert a user row to the contract model. The password digest stays
/// behind in the storage layer.
pub fn user_to_contract(entity: users::Model) -> User {
    User {
        id: entity.id,
        name: entity.name,
        email: entity.email,
        is_active: entity.is_active,
        can_create_books: entity.can_create_books,
        can_update_books: entity.can_update_books,
        can_disable_books: entity.can_disable_books,
        can_update_users: entity.can_update_users,
        can_disable_users: entity.can_disable_users,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    }
}

pub fn book_to_contract(entity: books::Model) -> Book {
    Book {
        id: entity.id,
        title: entity.title,
        author: entity.author,
        genre: entity.genre,
        publisher: entity.publisher,
        published_at: entity.published_at,
        is_available: entity.is_available,
        is_active: entity.is_active,
        created_at: entity.created_at,
    }
}
