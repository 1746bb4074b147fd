//! Scheduled job row model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use crate::scheduler::JobPayload;

/// Durable scheduled job. Queue semantics: rows are claimed with
/// `FOR UPDATE SKIP LOCKED`, then marked done or failed after dispatch.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ScheduledJob {
    pub id: i64,
    /// Job name; part of the internal contract with the dispatcher
    pub name: String,
    pub payload: Json<JobPayload>,
    pub run_at: DateTime<Utc>,
    /// pending | running | done | failed
    pub status: String,
    pub claimed_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}
