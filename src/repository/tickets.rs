//! Support tickets repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::ticket::{CreateTicket, Ticket, UpdateTicket},
};

#[derive(Clone)]
pub struct TicketsRepository {
    pool: Pool<Postgres>,
}

impl TicketsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Ticket> {
        sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchData, format!("Ticket with id {} not found", id)))
    }

    /// List tickets, all or for one user
    pub async fn list(&self, opened_by: Option<i32>) -> AppResult<Vec<Ticket>> {
        let tickets = sqlx::query_as::<_, Ticket>(
            r#"
            SELECT * FROM tickets
            WHERE ($1::int IS NULL OR opened_by = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(opened_by)
        .fetch_all(&self.pool)
        .await?;
        Ok(tickets)
    }

    pub async fn create(&self, ticket: &CreateTicket, opened_by: i32) -> AppResult<Ticket> {
        let created = sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (opened_by, subject, body, status)
            VALUES ($1, $2, $3, 'open')
            RETURNING *
            "#,
        )
        .bind(opened_by)
        .bind(&ticket.subject)
        .bind(&ticket.body)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn update(&self, id: i32, ticket: &UpdateTicket) -> AppResult<Ticket> {
        let updated = sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets
            SET status = COALESCE($2, status),
                staff_note = COALESCE($3, staff_note),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(ticket.status.map(|s| s.as_str()))
        .bind(&ticket.staff_note)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchData, format!("Ticket with id {} not found", id)))?;

        Ok(updated)
    }
}
