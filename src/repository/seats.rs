//! Seats repository for database operations
//!
//! Occupancy mutations take a `&mut PgConnection` so the engine can run
//! them inside a single transaction together with notification and
//! job-queue writes.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::seat::{CreateSeat, Seat, SeatQuery, UpdateSeat},
};

#[derive(Clone)]
pub struct SeatsRepository {
    pool: Pool<Postgres>,
}

impl SeatsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get seat by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Seat> {
        sqlx::query_as::<_, Seat>("SELECT * FROM seats WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchSeat, format!("Seat with id {} not found", id)))
    }

    /// Get seat by ID with a row lock, for use inside engine transactions
    pub async fn get_for_update(&self, conn: &mut PgConnection, id: i32) -> AppResult<Option<Seat>> {
        let seat = sqlx::query_as::<_, Seat>("SELECT * FROM seats WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(seat)
    }

    /// List seats with optional filters
    pub async fn list(&self, query: &SeatQuery) -> AppResult<Vec<Seat>> {
        let seats = sqlx::query_as::<_, Seat>(
            r#"
            SELECT * FROM seats
            WHERE ($1::text IS NULL OR kind = $1)
              AND ($2::bool IS NULL OR is_available = $2)
              AND ($3::text IS NULL OR location = $3)
            ORDER BY seat_number
            "#,
        )
        .bind(query.kind.map(|k| k.as_str()))
        .bind(query.available)
        .bind(&query.location)
        .fetch_all(&self.pool)
        .await?;

        Ok(seats)
    }

    /// Check whether a seat number is taken, optionally excluding a seat id
    pub async fn number_exists(&self, seat_number: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM seats WHERE seat_number = $1 AND ($2::int IS NULL OR id != $2))",
        )
        .bind(seat_number)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Register a new seat
    pub async fn create(&self, seat: &CreateSeat, managed_by: i32) -> AppResult<Seat> {
        let created = sqlx::query_as::<_, Seat>(
            r#"
            INSERT INTO seats (seat_number, kind, location, direction, description, managed_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&seat.seat_number)
        .bind(seat.kind.as_str())
        .bind(&seat.location)
        .bind(&seat.direction)
        .bind(&seat.description)
        .bind(managed_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update descriptive fields of a seat
    pub async fn update(&self, id: i32, seat: &UpdateSeat) -> AppResult<Seat> {
        let updated = sqlx::query_as::<_, Seat>(
            r#"
            UPDATE seats
            SET seat_number = COALESCE($2, seat_number),
                location = COALESCE($3, location),
                direction = COALESCE($4, direction),
                description = COALESCE($5, description)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&seat.seat_number)
        .bind(&seat.location)
        .bind(&seat.direction)
        .bind(&seat.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchSeat, format!("Seat with id {} not found", id)))?;

        Ok(updated)
    }

    /// Delete a seat. A seat is never deleted while it has an active
    /// reservation: the row lock holds off a concurrent reservation
    /// until the guarded delete has committed.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let seat = self
            .get_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(ErrorCode::NoSuchSeat, format!("Seat with id {} not found", id))
            })?;
        if !seat.is_available {
            return Err(AppError::Conflict(
                ErrorCode::SeatUnavailable,
                "Seat has an active reservation and cannot be deleted".to_string(),
            ));
        }

        sqlx::query("DELETE FROM seats WHERE id = $1 AND is_available")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Mark the seat occupied by a student (engine transaction only)
    pub async fn occupy(
        &self,
        conn: &mut PgConnection,
        seat_id: i32,
        student_id: i32,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE seats
            SET is_available = FALSE, reserved_by = $2, reserved_at = $3, released_at = NULL
            WHERE id = $1
            "#,
        )
        .bind(seat_id)
        .bind(student_id)
        .bind(at)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Free the seat (engine transaction only)
    pub async fn release(
        &self,
        conn: &mut PgConnection,
        seat_id: i32,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE seats
            SET is_available = TRUE, reserved_by = NULL, reserved_at = NULL, released_at = $2
            WHERE id = $1
            "#,
        )
        .bind(seat_id)
        .bind(at)
        .execute(conn)
        .await?;

        Ok(())
    }
}
