//! Repository layer for database operations

pub mod announcements;
pub mod books;
pub mod notifications;
pub mod questions;
pub mod seats;
pub mod tickets;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub seats: seats::SeatsRepository,
    pub notifications: notifications::NotificationsRepository,
    pub books: books::BooksRepository,
    pub announcements: announcements::AnnouncementsRepository,
    pub questions: questions::QuestionsRepository,
    pub tickets: tickets::TicketsRepository,
}

impl Repository {
    /// Round-trip query used by the readiness probe
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            seats: seats::SeatsRepository::new(pool.clone()),
            notifications: notifications::NotificationsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            announcements: announcements::AnnouncementsRepository::new(pool.clone()),
            questions: questions::QuestionsRepository::new(pool.clone()),
            tickets: tickets::TicketsRepository::new(pool.clone()),
            pool,
        }
    }
}
