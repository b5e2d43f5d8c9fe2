use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub reserved_at: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::books::Entity",
        from = "Column::BookId",
        to = "super::books::Column::Id"
    )]
    Book,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::books::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Find a reservation by ID
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(db).await
}

/// Insert a new open reservation
pub async fn create<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    user_id: Uuid,
    book_id: Uuid,
    reserved_at: DateTime<Utc>,
) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        id: Set(id),
        user_id: Set(user_id),
        book_id: Set(book_id),
        reserved_at: Set(reserved_at),
        delivered_at: Set(None),
    };

    active_model.insert(db).await
}

/// Close an open reservation.
///
/// Conditional update: sets `delivered_at` only while it is still null, so a
/// duplicate deliver can never overwrite the original timestamp. Returns
/// false when no open reservation with this id exists.
pub async fn mark_delivered<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    delivered_at: DateTime<Utc>,
) -> Result<bool, DbErr> {
    let result = Entity::update_many()
        .col_expr(Column::DeliveredAt, Expr::value(Some(delivered_at)))
        .filter(Column::Id.eq(id))
        .filter(Column::DeliveredAt.is_null())
        .exec(db)
        .await?;

    Ok(result.rows_affected == 1)
}

/// All reservations for a book, newest first, joined with the borrower
pub async fn find_by_book_with_user<C: ConnectionTrait>(
    db: &C,
    book_id: Uuid,
) -> Result<Vec<(Model, Option<super::users::Model>)>, DbErr> {
    Entity::find()
        .filter(Column::BookId.eq(book_id))
        .order_by_desc(Column::ReservedAt)
        .find_also_related(super::users::Entity)
        .all(db)
        .await
}

/// All reservations for a user, newest first, joined with the book
pub async fn find_by_user_with_book<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Vec<(Model, Option<super::books::Model>)>, DbErr> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::ReservedAt)
        .find_also_related(super::books::Entity)
        .all(db)
        .await
}

/// Count open reservations for a book (availability exclusivity check)
pub async fn count_open_for_book<C: ConnectionTrait>(db: &C, book_id: Uuid) -> Result<u64, DbErr> {
    Entity::find()
        .filter(Column::BookId.eq(book_id))
        .filter(Column::DeliveredAt.is_null())
        .count(db)
        .await
}
