use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};
use uuid::Uuid;

use crate::contract::model::BookFilter;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publisher: String,
    pub published_at: DateTime<Utc>,
    pub is_available: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
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

/// Data for inserting a new book row.
pub struct NewBookEntity {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publisher: String,
    pub published_at: DateTime<Utc>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

/// Data for patching an existing book row.
#[derive(Default)]
pub struct UpdateBookEntity {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_available: Option<bool>,
}

/// Find a book by ID
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(db).await
}

fn filter_condition(filter: &BookFilter) -> Condition {
    let mut cond = Condition::all();

    if !filter.include_inactive {
        cond = cond.add(Column::IsActive.eq(true));
    }
    if let Some(genre) = &filter.genre {
        cond = cond.add(Column::Genre.eq(genre.clone()));
    }
    if let Some(author) = &filter.author {
        cond = cond.add(ci_contains(Column::Author, author));
    }
    if let Some(publisher) = &filter.publisher {
        cond = cond.add(ci_contains(Column::Publisher, publisher));
    }
    if let Some(title) = &filter.title {
        cond = cond.add(ci_contains(Column::Title, title));
    }
    if let Some(is_available) = filter.is_available {
        cond = cond.add(Column::IsAvailable.eq(is_available));
    }
    if let Some(from) = filter.published_from {
        cond = cond.add(Column::PublishedAt.gte(from));
    }
    if let Some(to) = filter.published_to {
        cond = cond.add(Column::PublishedAt.lte(to));
    }

    cond
}

/// Case-insensitive substring match: LOWER(col) LIKE '%needle%'
fn ci_contains(column: Column, needle: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(format!("%{}%", needle.to_lowercase()))
}

/// Count the books matching the filter
pub async fn count_filtered<C: ConnectionTrait>(db: &C, filter: &BookFilter) -> Result<u64, DbErr> {
    Entity::find().filter(filter_condition(filter)).count(db).await
}

/// Title-only projection of one page of the filtered catalog, ascending by
/// title
pub async fn find_titles_paginated<C: ConnectionTrait>(
    db: &C,
    filter: &BookFilter,
) -> Result<Vec<String>, DbErr> {
    let offset = filter.page.saturating_sub(1).saturating_mul(filter.page_size);

    Entity::find()
        .filter(filter_condition(filter))
        .order_by_asc(Column::Title)
        .select_only()
        .column(Column::Title)
        .limit(filter.page_size)
        .offset(offset)
        .into_tuple::<String>()
        .all(db)
        .await
}

/// Insert a new book
pub async fn create<C: ConnectionTrait>(db: &C, new_book: NewBookEntity) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        id: Set(new_book.id),
        title: Set(new_book.title),
        author: Set(new_book.author),
        genre: Set(new_book.genre),
        publisher: Set(new_book.publisher),
        published_at: Set(new_book.published_at),
        is_available: Set(new_book.is_available),
        is_active: Set(true),
        created_at: Set(new_book.created_at),
    };

    active_model.insert(db).await
}

/// Patch an existing book
pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    update_data: UpdateBookEntity,
) -> Result<Model, DbErr> {
    let mut active_model = ActiveModel {
        id: Set(id),
        ..Default::default()
    };

    if let Some(title) = update_data.title {
        active_model.title = Set(title);
    }
    if let Some(author) = update_data.author {
        active_model.author = Set(author);
    }
    if let Some(genre) = update_data.genre {
        active_model.genre = Set(genre);
    }
    if let Some(publisher) = update_data.publisher {
        active_model.publisher = Set(publisher);
    }
    if let Some(published_at) = update_data.published_at {
        active_model.published_at = Set(published_at);
    }
    if let Some(is_available) = update_data.is_available {
        active_model.is_available = Set(is_available);
    }

    active_model.update(db).await
}

/// Soft-disable a book
pub async fn set_inactive<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Model, DbErr> {
    let active_model = ActiveModel {
        id: Set(id),
        is_active: Set(false),
        ..Default::default()
    };

    active_model.update(db).await
}

/// Claim an available book for a reservation.
///
/// Conditional single-row update: flips `is_available` to false only if it is
/// currently true. Returns false when the book was already claimed, which is
/// what makes two concurrent reservations on the same book safe.
pub async fn claim_available<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, DbErr> {
    let result = Entity::update_many()
        .col_expr(Column::IsAvailable, Expr::value(false))
        .filter(Column::Id.eq(id))
        .filter(Column::IsAvailable.eq(true))
        .exec(db)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Restore availability after a reservation is delivered
pub async fn release<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), DbErr> {
    Entity::update_many()
        .col_expr(Column::IsAvailable, Expr::value(true))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;

    Ok(())
}
