//! Community Q&A hub models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Question row from database
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Question {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Question with its answer count for listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct QuestionSummary {
    pub id: i32,
    pub author_id: i32,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub answer_count: i64,
}

/// Answer row from database
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Answer {
    pub id: i32,
    pub question_id: i32,
    pub author_id: i32,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Question detail with answers
#[derive(Debug, Serialize, ToSchema)]
pub struct QuestionDetail {
    pub question: Question,
    pub answers: Vec<Answer>,
}

/// Create question request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateQuestion {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
}

/// Create answer request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAnswer {
    #[validate(length(min = 1))]
    pub body: String,
}
