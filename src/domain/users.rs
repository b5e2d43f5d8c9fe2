use chrono::Utc;
use sea_orm::{DatabaseConnection, DbErr};
use tracing::info;
use uuid::Uuid;

use crate::contract::model::{NewUser, User, UserPatch};
use crate::domain::error::DomainError;
use crate::infra::storage::{mapper, users};

/// Configuration for the user service
#[derive(Debug, Clone)]
pub struct UsersConfig {
    /// bcrypt work factor for new password digests
    pub bcrypt_cost: u32,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// User registration, lookup, profile update and soft-disable.
pub struct UsersService {
    db: DatabaseConnection,
    config: UsersConfig,
}

impl UsersService {
    pub fn new(db: DatabaseConnection, config: UsersConfig) -> Self {
        Self { db, config }
    }

    /// Register a new user. The unique index on email is the authoritative
    /// guard; the pre-check just gives the common case a clean error.
    pub async fn register(&self, new_user: NewUser) -> Result<User, DomainError> {
        if users::email_exists(&self.db, &new_user.email).await? {
            return Err(DomainError::email_already_exists(new_user.email));
        }

        let cost = self.config.bcrypt_cost;
        let password = new_user.password;
        let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::credential(e.to_string()))?
            .map_err(|e| DomainError::credential(e.to_string()))?;

        let now = Utc::now();
        let created = users::create(
            &self.db,
            users::NewUserEntity {
                id: Uuid::new_v4(),
                name: new_user.name,
                email: new_user.email.clone(),
                password_hash,
                created_at: now,
                updated_at: now,
            },
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::email_already_exists(new_user.email)
            } else {
                e.into()
            }
        })?;

        info!(user_id = %created.id, "registered user");
        Ok(mapper::user_to_contract(created))
    }

    /// Get a user by id. Inactive users are hidden unless asked for.
    pub async fn get_by_id(&self, id: Uuid, include_inactive: bool) -> Result<User, DomainError> {
        let user = users::find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        if !include_inactive && !user.is_active {
            return Err(DomainError::user_not_found(id));
        }

        Ok(mapper::user_to_contract(user))
    }

    /// Apply a partial name/email patch
    pub async fn update(&self, id: Uuid, patch: UserPatch) -> Result<User, DomainError> {
        let email = patch.email.clone();
        let updated = users::update(
            &self.db,
            id,
            users::UpdateUserEntity {
                name: patch.name,
                email: patch.email,
                updated_at: Utc::now(),
            },
        )
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::user_not_found(id),
            // Only the email column is unique, so a violation without an
            // email in the patch is something else entirely.
            e if is_unique_violation(&e) => match email {
                Some(email) => DomainError::email_already_exists(email),
                None => e.into(),
            },
            e => e.into(),
        })?;

        Ok(mapper::user_to_contract(updated))
    }

    /// Soft-disable. Disabling an already disabled user succeeds.
    pub async fn disable(&self, id: Uuid) -> Result<User, DomainError> {
        let updated = users::set_inactive(&self.db, id, Utc::now())
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => DomainError::user_not_found(id),
                e => e.into(),
            })?;

        info!(user_id = %id, "disabled user");
        Ok(mapper::user_to_contract(updated))
    }
}

/// Best-effort detection of a unique-constraint violation across the sqlite
/// and postgres drivers.
fn is_unique_violation(err: &DbErr) -> bool {
    let msg = err.to_string().to_ascii_lowercase();
    msg.contains("unique constraint") || msg.contains("duplicate key")
}
