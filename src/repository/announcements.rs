//! Announcements repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::announcement::{Announcement, CreateAnnouncement},
};

#[derive(Clone)]
pub struct AnnouncementsRepository {
    pool: Pool<Postgres>,
}

impl AnnouncementsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Announcement> {
        sqlx::query_as::<_, Announcement>("SELECT * FROM announcements WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchData, format!("Announcement with id {} not found", id)))
    }

    pub async fn list(&self) -> AppResult<Vec<Announcement>> {
        let announcements = sqlx::query_as::<_, Announcement>(
            "SELECT * FROM announcements ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(announcements)
    }

    pub async fn create(
        &self,
        announcement: &CreateAnnouncement,
        posted_by: i32,
    ) -> AppResult<Announcement> {
        let created = sqlx::query_as::<_, Announcement>(
            r#"
            INSERT INTO announcements (title, body, posted_by)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&announcement.title)
        .bind(&announcement.body)
        .bind(posted_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    pub async fn update(&self, id: i32, announcement: &CreateAnnouncement) -> AppResult<Announcement> {
        let updated = sqlx::query_as::<_, Announcement>(
            "UPDATE announcements SET title = $2, body = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&announcement.title)
        .bind(&announcement.body)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchData, format!("Announcement with id {} not found", id)))?;

        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(ErrorCode::NoSuchData, format!("Announcement with id {} not found", id)));
        }

        Ok(())
    }
}
