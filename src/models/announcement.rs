//! Announcement model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Announcement row from database
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Announcement {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub posted_by: i32,
    pub created_at: DateTime<Utc>,
}

/// Create/update announcement request (staff)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAnnouncement {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
}
