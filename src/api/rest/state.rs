use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::auth::{AuthConfig, AuthService};
use crate::domain::books::BooksService;
use crate::domain::reservations::ReservationsService;
use crate::domain::users::{UsersConfig, UsersService};

/// Shared handler state: one stateless service per component, all over the
/// same connection pool.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UsersService>,
    pub books: Arc<BooksService>,
    pub reservations: Arc<ReservationsService>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, users_config: UsersConfig, auth_config: AuthConfig) -> Self {
        Self {
            users: Arc::new(UsersService::new(db.clone(), users_config)),
            books: Arc::new(BooksService::new(db.clone())),
            reservations: Arc::new(ReservationsService::new(db.clone())),
            auth: Arc::new(AuthService::new(db, auth_config)),
        }
    }
}
