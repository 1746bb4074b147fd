//! Announcement endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::announcement::{Announcement, CreateAnnouncement},
};

use super::AuthenticatedUser;

/// List announcements, newest first
#[utoipa::path(
    get,
    path = "/announcements",
    tag = "announcements",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Announcements", body = Vec<Announcement>)
    )
)]
pub async fn list(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Announcement>>> {
    let announcements = state.services.announcements.list().await?;
    Ok(Json(announcements))
}

/// Post an announcement
#[utoipa::path(
    post,
    path = "/announcements",
    tag = "announcements",
    security(("bearer_auth" = [])),
    request_body = CreateAnnouncement,
    responses(
        (status = 201, description = "Announcement posted", body = Announcement),
        (status = 403, description = "Staff privileges required")
    )
)]
pub async fn create(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateAnnouncement>,
) -> AppResult<(StatusCode, Json<Announcement>)> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let announcement = state
        .services
        .announcements
        .create(request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

/// Update an announcement
#[utoipa::path(
    put,
    path = "/announcements/{id}",
    tag = "announcements",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Announcement ID")),
    request_body = CreateAnnouncement,
    responses(
        (status = 200, description = "Announcement updated", body = Announcement),
        (status = 404, description = "Announcement not found")
    )
)]
pub async fn update(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(announcement_id): Path<i32>,
    Json(request): Json<CreateAnnouncement>,
) -> AppResult<Json<Announcement>> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let announcement = state
        .services
        .announcements
        .update(announcement_id, request)
        .await?;
    Ok(Json(announcement))
}

/// Delete an announcement
#[utoipa::path(
    delete,
    path = "/announcements/{id}",
    tag = "announcements",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Announcement ID")),
    responses(
        (status = 204, description = "Announcement deleted"),
        (status = 404, description = "Announcement not found")
    )
)]
pub async fn delete(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(announcement_id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;

    state.services.announcements.delete(announcement_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
