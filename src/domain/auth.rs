use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::contract::model::User;
use crate::domain::error::DomainError;
use crate::infra::storage::{mapper, users};

/// A specific mutating permission, independent of any role hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    CreateBooks,
    UpdateBooks,
    DisableBooks,
    UpdateUsers,
    DisableUsers,
}

/// Verified token payload. Capability flags are snapshotted at login and
/// stay fixed for the token's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub can_create_books: bool,
    pub can_update_books: bool,
    pub can_disable_books: bool,
    pub can_update_users: bool,
    pub can_disable_users: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::CreateBooks => self.can_create_books,
            Capability::UpdateBooks => self.can_update_books,
            Capability::DisableBooks => self.can_disable_books,
            Capability::UpdateUsers => self.can_update_users,
            Capability::DisableUsers => self.can_disable_users,
        }
    }

    /// Self-or-capability predicate: the caller may act on their own record,
    /// or on anyone's with the given capability.
    pub fn allows_self_or(&self, target: Uuid, capability: Capability) -> bool {
        self.sub == target || self.allows(capability)
    }
}

/// Authentication configuration: signing secret and token lifetime.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub token_secret: String,
    pub token_ttl_secs: u64,
}

impl AuthConfig {
    pub const DEFAULT_TTL_SECS: u64 = 3600;
}

/// Login and bearer-token issue/verify against the user store.
pub struct AuthService {
    db: DatabaseConnection,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_secs: u64,
}

impl AuthService {
    pub fn new(db: DatabaseConnection, config: AuthConfig) -> Self {
        Self {
            db,
            encoding_key: EncodingKey::from_secret(config.token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            token_ttl_secs: config.token_ttl_secs,
        }
    }

    /// Verify credentials and issue a signed token.
    ///
    /// Unknown email, disabled account and wrong password are deliberately
    /// indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), DomainError> {
        let user = users::find_by_email(&self.db, email)
            .await?
            .filter(|u| u.is_active)
            .ok_or(DomainError::InvalidCredentials)?;

        let password = password.to_owned();
        let password_hash = user.password_hash.clone();
        let ok = tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
            .await
            .map_err(|e| DomainError::credential(e.to_string()))?
            .map_err(|e| DomainError::credential(e.to_string()))?;

        if !ok {
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;

        info!(user_id = %user.id, "user logged in");
        Ok((token, mapper::user_to_contract(user)))
    }

    fn issue_token(&self, user: &users::Model) -> Result<String, DomainError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            can_create_books: user.can_create_books,
            can_update_books: user.can_update_books,
            can_disable_books: user.can_disable_books,
            can_update_users: user.can_update_users,
            can_disable_users: user.can_disable_users,
            iat: now,
            exp: now + self.token_ttl_secs as i64,
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::credential(e.to_string()))
    }

    /// Decode and validate a bearer token. Expiry is checked here; anything
    /// wrong with the token collapses into one error.
    pub fn verify_token(&self, token: &str) -> Result<Claims, DomainError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| DomainError::credential(e.to_string()))
    }
}
