//! Notification read-model endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::notification::{NotificationOverview, PendingNotification},
};

use super::AuthenticatedUser;

/// List the caller's notifications with an open decision window
#[utoipa::path(
    get,
    path = "/notifications/pending",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending notifications, newest first", body = Vec<PendingNotification>)
    )
)]
pub async fn pending(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<PendingNotification>>> {
    claims.require_student()?;

    let notifications = state
        .services
        .notifications
        .fetch_pending(claims.user_id)
        .await?;
    Ok(Json(notifications))
}

/// Partitioned overview of the caller's recent notifications
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notification overview", body = NotificationOverview)
    )
)]
pub async fn overview(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<NotificationOverview>> {
    claims.require_student()?;

    let overview = state
        .services
        .notifications
        .fetch_overview(claims.user_id)
        .await?;
    Ok(Json(overview))
}

/// Mark a notification as read
#[utoipa::path(
    put,
    path = "/notifications/{id}/read",
    tag = "notifications",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 204, description = "Marked read"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_read(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(notification_id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_student()?;

    state
        .services
        .notifications
        .mark_read(notification_id, claims.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
