//! Notification read model: projections over the trail the engine writes

use crate::{
    error::AppResult,
    models::{
        enums::{ActionResponse, NotificationType},
        notification::{
            NotificationCounts, NotificationOverview, PendingNotification, SeatNotification,
        },
    },
    repository::Repository,
};

/// How far back the overview looks
const OVERVIEW_LIMIT: i64 = 50;

#[derive(Clone)]
pub struct NotificationsService {
    repository: Repository,
}

impl NotificationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Notifications with an open decision window, newest first
    pub async fn fetch_pending(&self, student_id: i32) -> AppResult<Vec<PendingNotification>> {
        let notifications = self
            .repository
            .notifications
            .pending_for_student(student_id)
            .await?;
        Ok(notifications.into_iter().map(Into::into).collect())
    }

    /// Bounded recent trail, partitioned into pending-action,
    /// auto-release and other
    pub async fn fetch_overview(&self, student_id: i32) -> AppResult<NotificationOverview> {
        let notifications = self
            .repository
            .notifications
            .recent_for_student(student_id, OVERVIEW_LIMIT)
            .await?;
        Ok(partition_overview(notifications))
    }

    /// Mark an informational notification as read
    pub async fn mark_read(&self, notification_id: i32, student_id: i32) -> AppResult<()> {
        self.repository
            .notifications
            .mark_read(notification_id, student_id)
            .await
    }
}

/// Split the recent trail into the three overview buckets. Exhaustive:
/// every input row lands in exactly one bucket.
fn partition_overview(notifications: Vec<SeatNotification>) -> NotificationOverview {
    let mut pending_actions = Vec::new();
    let mut recent_releases = Vec::new();
    let mut other_notifications = Vec::new();
    let mut unread = 0;

    for notification in notifications {
        if !notification.is_read {
            unread += 1;
        }
        if notification.requires_action {
            pending_actions.push(notification);
        } else if notification.action_response() == Some(ActionResponse::AutoRelease)
            || notification.notification_type() == NotificationType::Release
        {
            recent_releases.push(notification);
        } else {
            other_notifications.push(notification);
        }
    }

    let counts = NotificationCounts {
        pending_actions: pending_actions.len(),
        recent_releases: recent_releases.len(),
        other: other_notifications.len(),
        unread,
    };

    NotificationOverview {
        pending_actions,
        recent_releases,
        other_notifications,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(
        id: i32,
        requires_action: bool,
        action_response: Option<&str>,
        notification_type: &str,
        is_read: bool,
    ) -> SeatNotification {
        SeatNotification {
            id,
            student_id: 1,
            seat_id: 1,
            message: "test".to_string(),
            is_read,
            requires_action,
            action_response: action_response.map(|s| s.to_string()),
            deadline: None,
            notification_type: notification_type.to_string(),
            previous_notification_id: None,
            extension_count: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn partition_is_exhaustive_and_counts_match() {
        let rows = vec![
            row(1, true, Some("pending"), "reminder", false),
            row(2, false, Some("auto_release"), "reminder", false),
            row(3, false, None, "release", true),
            row(4, false, None, "extension", false),
        ];
        let overview = partition_overview(rows);

        assert_eq!(overview.pending_actions.len(), 1);
        assert_eq!(overview.recent_releases.len(), 2);
        assert_eq!(overview.other_notifications.len(), 1);
        assert_eq!(overview.counts.pending_actions, 1);
        assert_eq!(overview.counts.recent_releases, 2);
        assert_eq!(overview.counts.other, 1);
        assert_eq!(overview.counts.unread, 3);
        assert_eq!(
            overview.pending_actions.len()
                + overview.recent_releases.len()
                + overview.other_notifications.len(),
            4
        );
    }

    #[test]
    fn resolved_reminder_is_not_pending() {
        let rows = vec![row(1, false, Some("extend"), "reminder", false)];
        let overview = partition_overview(rows);
        assert!(overview.pending_actions.is_empty());
        assert_eq!(overview.other_notifications.len(), 1);
    }

    #[test]
    fn empty_trail_gives_empty_overview() {
        let overview = partition_overview(Vec::new());
        assert_eq!(overview.counts.pending_actions, 0);
        assert_eq!(overview.counts.unread, 0);
    }
}
