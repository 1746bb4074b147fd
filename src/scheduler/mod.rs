//! Durable job scheduling.
//!
//! The reservation engine never talks to a global queue; it receives a
//! [`Scheduler`] capability whose operations run on the caller's database
//! connection, so scheduling and cancellation commit (or abort) together
//! with the seat and notification writes of the same transaction.

pub mod queue;
pub mod worker;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use std::str::FromStr;

use crate::error::AppResult;

pub use queue::PgJobQueue;
pub use worker::SchedulerWorker;

/// Names of the jobs the engine schedules. The string forms are part of
/// the internal contract between call sites and the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobName {
    SendReservationNotification,
    AutoReleaseSeat,
}

impl JobName {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobName::SendReservationNotification => "send reservation notification",
            JobName::AutoReleaseSeat => "auto release seat",
        }
    }
}

impl FromStr for JobName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "send reservation notification" => Ok(JobName::SendReservationNotification),
            "auto release seat" => Ok(JobName::AutoReleaseSeat),
            other => Err(format!("unknown job name: {}", other)),
        }
    }
}

/// Job payload. `notification_id` is present only on auto-release jobs;
/// absent fields are omitted from the stored JSON so payload-match
/// cancellation sees exactly the shape the call site wrote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobPayload {
    pub seat_id: i32,
    pub student_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<i32>,
}

impl JobPayload {
    pub fn reservation(seat_id: i32, student_id: i32) -> Self {
        Self { seat_id, student_id, notification_id: None }
    }

    pub fn auto_release(seat_id: i32, student_id: i32, notification_id: i32) -> Self {
        Self { seat_id, student_id, notification_id: Some(notification_id) }
    }
}

/// Injected scheduling capability.
///
/// Every method takes the caller's connection so the queue mutation is
/// atomic with whatever else the caller is writing.
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Schedule a named job to fire at or after `run_at`.
    async fn schedule(
        &self,
        conn: &mut PgConnection,
        name: JobName,
        payload: JobPayload,
        run_at: DateTime<Utc>,
    ) -> AppResult<i64>;

    /// Cancel pending jobs whose payload references the notification.
    /// Best-effort: a job already claimed by the worker is untouched and
    /// relies on its own re-validation instead.
    async fn cancel_for_notification(
        &self,
        conn: &mut PgConnection,
        notification_id: i32,
    ) -> AppResult<u64>;

    /// Cancel all pending jobs whose payload references the seat.
    async fn cancel_for_seat(&self, conn: &mut PgConnection, seat_id: i32) -> AppResult<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_name_round_trip() {
        for name in [JobName::SendReservationNotification, JobName::AutoReleaseSeat] {
            assert_eq!(name.as_str().parse::<JobName>().unwrap(), name);
        }
        assert!("send something else".parse::<JobName>().is_err());
    }

    #[test]
    fn reservation_payload_omits_notification_id() {
        let payload = JobPayload::reservation(3, 7);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"seat_id": 3, "student_id": 7}));
    }

    #[test]
    fn auto_release_payload_round_trip() {
        let payload = JobPayload::auto_release(3, 7, 11);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"seat_id": 3, "student_id": 7, "notification_id": 11})
        );
        let back: JobPayload = serde_json::from_value(json).unwrap();
        assert_eq!(back, payload);
    }
}
