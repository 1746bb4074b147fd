//! Support ticket models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::TicketStatus;

/// Support ticket row from database
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Ticket {
    pub id: i32,
    pub opened_by: i32,
    pub subject: String,
    pub body: String,
    /// open | in_progress | closed
    pub status: String,
    pub staff_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    pub fn status(&self) -> TicketStatus {
        self.status.parse().unwrap_or(TicketStatus::Open)
    }
}

/// Open ticket request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTicket {
    #[validate(length(min = 1, max = 255))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub body: String,
}

/// Staff ticket update
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTicket {
    pub status: Option<TicketStatus>,
    pub staff_note: Option<String>,
}
