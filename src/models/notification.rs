//! Seat notification trail model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::{ActionResponse, NotificationType};

/// One row of the append-only notification trail.
///
/// Rows are never mutated after insert except to resolve the
/// `requires_action`/`action_response` pair on the row being acted upon.
/// `action_response` is NULL on purely informational rows.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct SeatNotification {
    pub id: i32,
    pub student_id: i32,
    pub seat_id: i32,
    pub message: String,
    pub is_read: bool,
    /// True only while an open decision window exists
    pub requires_action: bool,
    pub action_response: Option<String>,
    /// When the action window closes; auto-release fires at this time
    pub deadline: Option<DateTime<Utc>>,
    pub notification_type: String,
    /// Back-reference to the event this row supersedes
    pub previous_notification_id: Option<i32>,
    /// Number of extensions granted earlier in this seat episode
    pub extension_count: i32,
    pub created_at: DateTime<Utc>,
}

impl SeatNotification {
    pub fn action_response(&self) -> Option<ActionResponse> {
        self.action_response.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn notification_type(&self) -> NotificationType {
        self.notification_type.parse().unwrap_or(NotificationType::Initial)
    }

    pub fn is_pending(&self) -> bool {
        self.requires_action && self.action_response() == Some(ActionResponse::Pending)
    }
}

/// Insert form for a trail row; the engine is the only writer
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub student_id: i32,
    pub seat_id: i32,
    pub message: String,
    pub requires_action: bool,
    pub action_response: Option<ActionResponse>,
    pub deadline: Option<DateTime<Utc>>,
    pub notification_type: NotificationType,
    pub previous_notification_id: Option<i32>,
    pub extension_count: i32,
}

/// Student response to an actionable notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StudentResponse {
    Extend,
    Release,
}

impl StudentResponse {
    pub fn as_action(&self) -> ActionResponse {
        match self {
            StudentResponse::Extend => ActionResponse::Extend,
            StudentResponse::Release => ActionResponse::Release,
        }
    }
}

/// Pending notification as returned by `GET /notifications/pending`
#[derive(Debug, Serialize, ToSchema)]
pub struct PendingNotification {
    pub id: i32,
    pub message: String,
    pub deadline: Option<DateTime<Utc>>,
    pub seat_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<SeatNotification> for PendingNotification {
    fn from(n: SeatNotification) -> Self {
        Self {
            id: n.id,
            message: n.message,
            deadline: n.deadline,
            seat_id: n.seat_id,
            created_at: n.created_at,
        }
    }
}

/// Counts attached to the notification overview
#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationCounts {
    pub pending_actions: usize,
    pub recent_releases: usize,
    pub other: usize,
    pub unread: usize,
}

/// Partitioned notification overview for `GET /notifications`
#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationOverview {
    pub pending_actions: Vec<SeatNotification>,
    pub recent_releases: Vec<SeatNotification>,
    pub other_notifications: Vec<SeatNotification>,
    pub counts: NotificationCounts,
}
