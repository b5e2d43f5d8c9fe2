use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;
use uuid::Uuid;

use crate::contract::model::{BookHistoryEntry, ReservationView, UserHistoryEntry};
use crate::domain::error::DomainError;
use crate::infra::storage::{books, reservations, users};

/// The reservation workflow: Available -> Reserved(open) -> Delivered, where
/// delivery returns the book to Available.
///
/// Both transitions run inside a single transaction so the reservation row
/// and the book's availability flag can never drift apart.
pub struct ReservationsService {
    db: DatabaseConnection,
}

impl ReservationsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reserve an available book for a user.
    ///
    /// The availability flip is a conditional update, so of two concurrent
    /// calls on the same book exactly one claims it; the loser gets
    /// `BookNotAvailable` regardless of interleaving.
    pub async fn create(
        &self,
        user_id: Uuid,
        book_id: Uuid,
    ) -> Result<ReservationView, DomainError> {
        let txn = self.db.begin().await?;

        let book = books::find_by_id(&txn, book_id)
            .await?
            .filter(|b| b.is_active)
            .ok_or_else(|| DomainError::book_not_found(book_id))?;

        if !books::claim_available(&txn, book_id).await? {
            return Err(DomainError::book_not_available(book_id));
        }

        let user = users::find_by_id(&txn, user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id))?;

        let reservation =
            reservations::create(&txn, Uuid::new_v4(), user_id, book_id, Utc::now()).await?;

        txn.commit().await?;

        info!(reservation_id = %reservation.id, book_id = %book_id, "created reservation");

        Ok(ReservationView {
            id: reservation.id,
            user_name: user.name,
            book_title: book.title,
            reserved_at: reservation.reserved_at,
            delivered_at: reservation.delivered_at,
        })
    }

    /// Mark an open reservation delivered and restore the book's
    /// availability. `delivered_at`, once set, is never overwritten.
    pub async fn deliver(&self, reservation_id: Uuid) -> Result<ReservationView, DomainError> {
        let txn = self.db.begin().await?;

        let delivered_at = Utc::now();
        if !reservations::mark_delivered(&txn, reservation_id, delivered_at).await? {
            // No open reservation with this id: missing or already closed.
            return match reservations::find_by_id(&txn, reservation_id).await? {
                None => Err(DomainError::reservation_not_found(reservation_id)),
                Some(_) => Err(DomainError::already_delivered(reservation_id)),
            };
        }

        let reservation = reservations::find_by_id(&txn, reservation_id)
            .await?
            .ok_or_else(|| DomainError::reservation_not_found(reservation_id))?;

        books::release(&txn, reservation.book_id).await?;

        let user = users::find_by_id(&txn, reservation.user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(reservation.user_id))?;
        let book = books::find_by_id(&txn, reservation.book_id)
            .await?
            .ok_or_else(|| DomainError::book_not_found(reservation.book_id))?;

        txn.commit().await?;

        info!(reservation_id = %reservation_id, book_id = %reservation.book_id, "delivered reservation");

        Ok(ReservationView {
            id: reservation.id,
            user_name: user.name,
            book_title: book.title,
            reserved_at: reservation.reserved_at,
            delivered_at: reservation.delivered_at,
        })
    }

    /// Reservation history for a book, newest first. An unknown book id
    /// yields an empty list.
    pub async fn history_by_book(
        &self,
        book_id: Uuid,
    ) -> Result<Vec<BookHistoryEntry>, DomainError> {
        let rows = reservations::find_by_book_with_user(&self.db, book_id).await?;

        Ok(rows
            .into_iter()
            .map(|(r, user)| BookHistoryEntry {
                id: r.id,
                user_name: user.map(|u| u.name).unwrap_or_default(),
                reserved_at: r.reserved_at,
                delivered_at: r.delivered_at,
            })
            .collect())
    }

    /// Reservation history for a user, newest first.
    pub async fn history_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserHistoryEntry>, DomainError> {
        let rows = reservations::find_by_user_with_book(&self.db, user_id).await?;

        Ok(rows
            .into_iter()
            .map(|(r, book)| UserHistoryEntry {
                id: r.id,
                book_title: book.map(|b| b.title).unwrap_or_default(),
                reserved_at: r.reserved_at,
                delivered_at: r.delivered_at,
            })
            .collect())
    }
}
