pub mod auth;
pub mod books;
pub mod error;
pub mod reservations;
pub mod users;
