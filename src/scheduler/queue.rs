//! Postgres-backed job queue

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::AppResult,
    models::job::ScheduledJob,
};

use super::{JobName, JobPayload, Scheduler};

/// Scheduler implementation over the `scheduled_jobs` table.
#[derive(Clone)]
pub struct PgJobQueue {
    pool: Pool<Postgres>,
}

impl PgJobQueue {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Atomically claim due pending jobs.
    ///
    /// `FOR UPDATE SKIP LOCKED` prevents double-dispatch when several
    /// worker instances poll the same table.
    pub async fn claim_due(&self, limit: i64) -> AppResult<Vec<ScheduledJob>> {
        let jobs = sqlx::query_as::<_, ScheduledJob>(
            r#"
            UPDATE scheduled_jobs
            SET status = 'running', claimed_at = NOW()
            WHERE id IN (
                SELECT id FROM scheduled_jobs
                WHERE status = 'pending' AND run_at <= NOW()
                ORDER BY run_at
                LIMIT $1
                FOR UPDATE SKIP LOCKED
            )
            RETURNING *
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    /// Queue semantics: a job that ran to completion is deleted.
    pub async fn mark_done(&self, job_id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM scheduled_jobs WHERE id = $1")
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Failed jobs are kept with the error text, and not retried.
    pub async fn mark_failed(&self, job_id: i64, error: &str) -> AppResult<()> {
        sqlx::query("UPDATE scheduled_jobs SET status = 'failed', error = $2 WHERE id = $1")
            .bind(job_id)
            .bind(error)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Re-queue running jobs whose claim went stale (worker died mid-run).
    /// This is where at-least-once delivery comes from; handlers must be
    /// idempotent.
    pub async fn requeue_stale(&self, stale_seconds: i64) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE scheduled_jobs
            SET status = 'pending', claimed_at = NULL
            WHERE status = 'running'
              AND claimed_at < NOW() - make_interval(secs => $1)
            "#,
        )
        .bind(stale_seconds as f64)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl Scheduler for PgJobQueue {
    async fn schedule(
        &self,
        conn: &mut PgConnection,
        name: JobName,
        payload: JobPayload,
        run_at: DateTime<Utc>,
    ) -> AppResult<i64> {
        let payload = serde_json::to_value(&payload)
            .map_err(|e| crate::error::AppError::Internal(format!("Failed to encode job payload: {}", e)))?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO scheduled_jobs (name, payload, run_at, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING id
            "#,
        )
        .bind(name.as_str())
        .bind(payload)
        .bind(run_at)
        .fetch_one(conn)
        .await?;

        Ok(id)
    }

    async fn cancel_for_notification(
        &self,
        conn: &mut PgConnection,
        notification_id: i32,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM scheduled_jobs
            WHERE status = 'pending'
              AND payload @> jsonb_build_object('notification_id', $1::int)
            "#,
        )
        .bind(notification_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }

    async fn cancel_for_seat(&self, conn: &mut PgConnection, seat_id: i32) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM scheduled_jobs
            WHERE status = 'pending'
              AND payload @> jsonb_build_object('seat_id', $1::int)
            "#,
        )
        .bind(seat_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }
}
