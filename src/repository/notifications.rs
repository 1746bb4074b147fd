//! Notification trail repository
//!
//! Trail writes happen inside engine transactions and therefore take a
//! `&mut PgConnection`; the read-model queries run off the pool.

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::{
        enums::ActionResponse,
        notification::{NewNotification, SeatNotification},
    },
};

#[derive(Clone)]
pub struct NotificationsRepository {
    pool: Pool<Postgres>,
}

impl NotificationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append a trail row
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        notification: &NewNotification,
    ) -> AppResult<SeatNotification> {
        let inserted = sqlx::query_as::<_, SeatNotification>(
            r#"
            INSERT INTO seat_notifications
                (student_id, seat_id, message, requires_action, action_response,
                 deadline, notification_type, previous_notification_id, extension_count)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(notification.student_id)
        .bind(notification.seat_id)
        .bind(&notification.message)
        .bind(notification.requires_action)
        .bind(notification.action_response.map(|a| a.as_str()))
        .bind(notification.deadline)
        .bind(notification.notification_type.as_str())
        .bind(notification.previous_notification_id)
        .bind(notification.extension_count)
        .fetch_one(conn)
        .await?;

        Ok(inserted)
    }

    /// Unlocked read inside a transaction, used to learn the seat id
    /// before taking locks in the engine's seat-then-notification order
    pub async fn latest_by_id(
        &self,
        conn: &mut PgConnection,
        id: i32,
    ) -> AppResult<Option<SeatNotification>> {
        let notification = sqlx::query_as::<_, SeatNotification>(
            "SELECT * FROM seat_notifications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;
        Ok(notification)
    }

    /// Get a notification with a row lock, for engine transactions
    pub async fn get_for_update(
        &self,
        conn: &mut PgConnection,
        id: i32,
    ) -> AppResult<Option<SeatNotification>> {
        let notification = sqlx::query_as::<_, SeatNotification>(
            "SELECT * FROM seat_notifications WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;
        Ok(notification)
    }

    /// Resolve the row being acted upon: close the decision window and
    /// record the outcome. The only permitted mutation of a trail row.
    pub async fn resolve(
        &self,
        conn: &mut PgConnection,
        id: i32,
        action: ActionResponse,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE seat_notifications SET requires_action = FALSE, action_response = $2 WHERE id = $1",
        )
        .bind(id)
        .bind(action.as_str())
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Expire every open decision window for a seat (staff override path)
    pub async fn expire_pending_for_seat(
        &self,
        conn: &mut PgConnection,
        seat_id: i32,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE seat_notifications
            SET requires_action = FALSE, action_response = $2
            WHERE seat_id = $1 AND requires_action = TRUE
            "#,
        )
        .bind(seat_id)
        .bind(ActionResponse::Expired.as_str())
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Most recent trail row for a seat/student pair, inside a transaction
    pub async fn latest_for_seat(
        &self,
        conn: &mut PgConnection,
        seat_id: i32,
        student_id: i32,
    ) -> AppResult<Option<SeatNotification>> {
        let notification = sqlx::query_as::<_, SeatNotification>(
            r#"
            SELECT * FROM seat_notifications
            WHERE seat_id = $1 AND student_id = $2
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(seat_id)
        .bind(student_id)
        .fetch_optional(conn)
        .await?;
        Ok(notification)
    }

    /// All open decision windows for a student, newest first
    pub async fn pending_for_student(&self, student_id: i32) -> AppResult<Vec<SeatNotification>> {
        let notifications = sqlx::query_as::<_, SeatNotification>(
            r#"
            SELECT * FROM seat_notifications
            WHERE student_id = $1 AND requires_action = TRUE
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }

    /// Bounded recent trail for a student, newest first
    pub async fn recent_for_student(
        &self,
        student_id: i32,
        limit: i64,
    ) -> AppResult<Vec<SeatNotification>> {
        let notifications = sqlx::query_as::<_, SeatNotification>(
            r#"
            SELECT * FROM seat_notifications
            WHERE student_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(student_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }

    /// Mark an informational notification read. Scoped to the owning
    /// student so one user cannot touch another's trail.
    pub async fn mark_read(&self, id: i32, student_id: i32) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE seat_notifications SET is_read = TRUE WHERE id = $1 AND student_id = $2",
        )
        .bind(id)
        .bind(student_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                ErrorCode::NoSuchNotification,
                "Notification not found".to_string(),
            ));
        }

        Ok(())
    }
}
