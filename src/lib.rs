//! Library reservation REST backend: user registration and login, a book
//! catalog, and a reservation workflow that keeps each book's availability
//! in lockstep with its open reservation.

pub mod api;
pub mod config;
pub mod contract;
pub mod domain;
pub mod infra;
