use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub is_active: bool,
    pub can_create_books: bool,
    pub can_update_books: bool,
    pub can_disable_books: bool,
    pub can_update_users: bool,
    pub can_disable_users: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reservations::Entity")]
    Reservations,
}

impl Related<super::reservations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Data for inserting a new user row.
pub struct NewUserEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for patching an existing user row.
pub struct UpdateUserEntity {
    pub name: Option<String>,
    pub email: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Find a user by ID
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(db).await
}

/// Find a user by email (active or not)
pub async fn find_by_email<C: ConnectionTrait>(
    db: &C,
    email: &str,
) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await
}

/// Check if an email already exists, regardless of the active flag
pub async fn email_exists<C: ConnectionTrait>(db: &C, email: &str) -> Result<bool, DbErr> {
    let count = Entity::find()
        .filter(Column::Email.eq(email))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Insert a new user. Capability flags start out all false.
pub async fn create<C: ConnectionTrait>(db: &C, new_user: NewUserEntity) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        id: Set(new_user.id),
        name: Set(new_user.name),
        email: Set(new_user.email),
        password_hash: Set(new_user.password_hash),
        is_active: Set(true),
        can_create_books: Set(false),
        can_update_books: Set(false),
        can_disable_books: Set(false),
        can_update_users: Set(false),
        can_disable_users: Set(false),
        created_at: Set(new_user.created_at),
        updated_at: Set(new_user.updated_at),
    };

    active_model.insert(db).await
}

/// Patch name/email on an existing user
pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    update_data: UpdateUserEntity,
) -> Result<Model, DbErr> {
    let mut active_model = ActiveModel {
        id: Set(id),
        updated_at: Set(update_data.updated_at),
        ..Default::default()
    };

    if let Some(name) = update_data.name {
        active_model.name = Set(name);
    }
    if let Some(email) = update_data.email {
        active_model.email = Set(email);
    }

    active_model.update(db).await
}

/// Soft-disable a user. Re-disabling an already inactive user is a no-op.
pub async fn set_inactive<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    now: DateTime<Utc>,
) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        id: Set(id),
        is_active: Set(false),
        updated_at: Set(now),
        ..Default::default()
    };

    active_model.update(db).await
}
