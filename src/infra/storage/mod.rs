pub mod books;
pub mod mapper;
pub mod migrations;
pub mod reservations;
pub mod users;
