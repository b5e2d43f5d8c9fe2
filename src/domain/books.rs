use chrono::Utc;
use sea_orm::{DatabaseConnection, DbErr};
use tracing::info;
use uuid::Uuid;

use crate::contract::model::{Book, BookFilter, BookPage, BookPatch, NewBook};
use crate::domain::error::DomainError;
use crate::infra::storage::{books, mapper};

/// Book catalog CRUD and the filtered, paginated, title-only listing.
pub struct BooksService {
    db: DatabaseConnection,
}

impl BooksService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, new_book: NewBook) -> Result<Book, DomainError> {
        let created = books::create(
            &self.db,
            books::NewBookEntity {
                id: Uuid::new_v4(),
                title: new_book.title,
                author: new_book.author,
                genre: new_book.genre,
                publisher: new_book.publisher,
                published_at: new_book.published_at,
                is_available: new_book.is_available.unwrap_or(true),
                created_at: Utc::now(),
            },
        )
        .await?;

        info!(book_id = %created.id, title = %created.title, "created book");
        Ok(mapper::book_to_contract(created))
    }

    /// Get a book by id. Inactive books are hidden unless asked for.
    pub async fn get_by_id(&self, id: Uuid, include_inactive: bool) -> Result<Book, DomainError> {
        let book = books::find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::book_not_found(id))?;

        if !include_inactive && !book.is_active {
            return Err(DomainError::book_not_found(id));
        }

        Ok(mapper::book_to_contract(book))
    }

    /// Filtered, paginated, title-only listing sorted ascending by title.
    pub async fn list(&self, filter: BookFilter) -> Result<BookPage, DomainError> {
        let filter = BookFilter {
            page: filter.page.max(1),
            page_size: filter.page_size.max(1),
            ..filter
        };

        let total = books::count_filtered(&self.db, &filter).await?;
        let max_page = max_page(total, filter.page_size);

        // A page past the end is an empty page; skipping the query also keeps
        // arbitrarily large page numbers away from the offset computation.
        let titles = if filter.page > max_page {
            Vec::new()
        } else {
            books::find_titles_paginated(&self.db, &filter).await?
        };

        Ok(BookPage {
            page: filter.page,
            page_size: filter.page_size,
            max_page,
            total,
            titles,
        })
    }

    /// Apply a partial patch. This path can override `is_available` directly;
    /// see DESIGN.md for why that is kept.
    pub async fn update(&self, id: Uuid, patch: BookPatch) -> Result<Book, DomainError> {
        let updated = books::update(
            &self.db,
            id,
            books::UpdateBookEntity {
                title: patch.title,
                author: patch.author,
                genre: patch.genre,
                publisher: patch.publisher,
                published_at: patch.published_at,
                is_available: patch.is_available,
            },
        )
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::book_not_found(id),
            e => e.into(),
        })?;

        Ok(mapper::book_to_contract(updated))
    }

    /// Soft-disable. Historical reservations keep referencing the book.
    pub async fn disable(&self, id: Uuid) -> Result<Book, DomainError> {
        let updated = books::set_inactive(&self.db, id).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::book_not_found(id),
            e => e.into(),
        })?;

        info!(book_id = %id, "disabled book");
        Ok(mapper::book_to_contract(updated))
    }
}

/// max(1, ceil(total / page_size))
fn max_page(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size).max(1)
}

#[cfg(test)]
mod tests {
    use super::max_page;

    #[test]
    fn max_page_is_never_zero() {
        assert_eq!(max_page(0, 10), 1);
    }

    #[test]
    fn max_page_rounds_up() {
        assert_eq!(max_page(10, 10), 1);
        assert_eq!(max_page(11, 10), 2);
        assert_eq!(max_page(21, 10), 3);
        assert_eq!(max_page(1, 1), 1);
    }
}
