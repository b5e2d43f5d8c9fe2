use anyhow::Result;
use chrono::{TimeZone, Utc};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use librarium::contract::model::{NewBook, NewUser, User};
use librarium::domain::books::BooksService;
use librarium::domain::error::DomainError;
use librarium::domain::reservations::ReservationsService;
use librarium::domain::users::{UsersConfig, UsersService};
use librarium::infra::storage::migrations::Migrator;
use librarium::infra::storage::reservations;

/// One shared in-memory database behind a single-connection pool, so
/// concurrent transactions contend on the same store.
async fn create_test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);

    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

struct Fixture {
    db: DatabaseConnection,
    users: UsersService,
    books: BooksService,
    reservations: ReservationsService,
}

async fn create_fixture() -> Fixture {
    let db = create_test_db().await;
    Fixture {
        users: UsersService::new(db.clone(), UsersConfig { bcrypt_cost: 4 }),
        books: BooksService::new(db.clone()),
        reservations: ReservationsService::new(db.clone()),
        db,
    }
}

async fn seed_user(fx: &Fixture) -> Result<User> {
    Ok(fx
        .users
        .register(NewUser {
            name: "Reader".to_string(),
            email: "reader@example.com".to_string(),
            password: "secreto123".to_string(),
        })
        .await?)
}

fn new_book(title: &str) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: "Julio Cortázar".to_string(),
        genre: "Fiction".to_string(),
        publisher: "Sudamericana".to_string(),
        published_at: Utc.with_ymd_and_hms(1963, 6, 28, 0, 0, 0).unwrap(),
        is_available: None,
    }
}

#[tokio::test]
async fn full_cycle_keeps_availability_and_open_count_in_lockstep() -> Result<()> {
    let fx = create_fixture().await;
    let user = seed_user(&fx).await?;
    let book = fx.books.create(new_book("Rayuela")).await?;
    assert!(book.is_available);

    let view = fx.reservations.create(user.id, book.id).await?;
    assert_eq!(view.user_name, "Reader");
    assert_eq!(view.book_title, "Rayuela");
    assert!(view.delivered_at.is_none());

    // Reserved: unavailable, exactly one open reservation.
    let fetched = fx.books.get_by_id(book.id, false).await?;
    assert!(!fetched.is_available);
    assert_eq!(reservations::count_open_for_book(&fx.db, book.id).await?, 1);

    let delivered = fx.reservations.deliver(view.id).await?;
    assert!(delivered.delivered_at.is_some());

    // Delivered: available again, no open reservation.
    let fetched = fx.books.get_by_id(book.id, false).await?;
    assert!(fetched.is_available);
    assert_eq!(reservations::count_open_for_book(&fx.db, book.id).await?, 0);

    Ok(())
}

#[tokio::test]
async fn concurrent_reservations_on_one_book_admit_exactly_one() -> Result<()> {
    let fx = create_fixture().await;
    let user = seed_user(&fx).await?;
    let book = fx.books.create(new_book("Bestiario")).await?;

    let (first, second) = tokio::join!(
        fx.reservations.create(user.id, book.id),
        fx.reservations.create(user.id, book.id),
    );

    let (winner, loser) = match (first, second) {
        (Ok(view), Err(err)) | (Err(err), Ok(view)) => (view, err),
        (Ok(_), Ok(_)) => panic!("both concurrent reservations succeeded"),
        (Err(a), Err(b)) => panic!("both concurrent reservations failed: {a}, {b}"),
    };

    assert!(winner.delivered_at.is_none());
    assert!(matches!(loser, DomainError::BookNotAvailable { .. }));

    // Final state: unavailable with a single open reservation.
    let fetched = fx.books.get_by_id(book.id, false).await?;
    assert!(!fetched.is_available);
    assert_eq!(reservations::count_open_for_book(&fx.db, book.id).await?, 1);

    Ok(())
}

#[tokio::test]
async fn deliver_is_rejected_once_closed() -> Result<()> {
    let fx = create_fixture().await;
    let user = seed_user(&fx).await?;
    let book = fx.books.create(new_book("Final del juego")).await?;

    let view = fx.reservations.create(user.id, book.id).await?;
    let delivered = fx.reservations.deliver(view.id).await?;
    let first_delivery = delivered.delivered_at;

    let err = fx.reservations.deliver(view.id).await.unwrap_err();
    assert!(matches!(err, DomainError::AlreadyDelivered { .. }));

    // The original timestamp survives the duplicate call.
    let row = reservations::find_by_id(&fx.db, view.id).await?.unwrap();
    assert_eq!(row.delivered_at, first_delivery);

    let fetched = fx.books.get_by_id(book.id, false).await?;
    assert!(fetched.is_available);

    Ok(())
}

#[tokio::test]
async fn history_is_per_entity_and_newest_first() -> Result<()> {
    let fx = create_fixture().await;
    let user = seed_user(&fx).await?;
    let first_book = fx.books.create(new_book("62/Modelo para armar")).await?;
    let second_book = fx.books.create(new_book("Los premios")).await?;

    let first = fx.reservations.create(user.id, first_book.id).await?;
    fx.reservations.deliver(first.id).await?;
    let second = fx.reservations.create(user.id, second_book.id).await?;

    let by_user = fx.reservations.history_by_user(user.id).await?;
    assert_eq!(by_user.len(), 2);
    assert_eq!(by_user[0].id, second.id);
    assert_eq!(by_user[0].book_title, "Los premios");
    assert!(by_user[0].delivered_at.is_none());
    assert!(by_user[1].delivered_at.is_some());

    let by_book = fx.reservations.history_by_book(first_book.id).await?;
    assert_eq!(by_book.len(), 1);
    assert_eq!(by_book[0].user_name, "Reader");

    Ok(())
}

#[tokio::test]
async fn reservation_history_survives_disabling_user_and_book() -> Result<()> {
    let fx = create_fixture().await;
    let user = seed_user(&fx).await?;
    let book = fx.books.create(new_book("Historias de cronopios")).await?;

    let view = fx.reservations.create(user.id, book.id).await?;
    fx.reservations.deliver(view.id).await?;

    fx.users.disable(user.id).await?;
    fx.books.disable(book.id).await?;

    // Soft-disabled rows keep their historical references intact.
    let by_book = fx.reservations.history_by_book(book.id).await?;
    assert_eq!(by_book.len(), 1);
    assert_eq!(by_book[0].user_name, "Reader");

    let by_user = fx.reservations.history_by_user(user.id).await?;
    assert_eq!(by_user.len(), 1);
    assert_eq!(by_user[0].book_title, "Historias de cronopios");

    Ok(())
}
