//! Book catalog and borrow request models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::BorrowRequestStatus;

/// Book row from database
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub category: Option<String>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub added_by: i32,
    pub created_at: DateTime<Utc>,
}

/// Create book request (staff)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 1))]
    pub total_copies: i32,
}

/// Update book request (staff)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 1))]
    pub total_copies: Option<i32>,
}

/// Book listing filters
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
}

/// Borrow request row
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BorrowRequest {
    pub id: i32,
    pub book_id: i32,
    pub student_id: i32,
    /// pending | approved | rejected | returned
    pub status: String,
    pub requested_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl BorrowRequest {
    pub fn status(&self) -> BorrowRequestStatus {
        self.status.parse().unwrap_or(BorrowRequestStatus::Pending)
    }
}

/// Staff decision on a borrow request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBorrowRequest {
    pub status: BorrowRequestStatus,
}
