//! Seat reservation endpoints driving the engine

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{notification::StudentResponse, seat::Seat},
};

use super::AuthenticatedUser;

/// Reserve seat request
#[derive(Deserialize, ToSchema)]
pub struct ReserveRequest {
    pub seat_id: i32,
}

/// Generic message response
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Respond-to-notification request
#[derive(Deserialize, ToSchema)]
pub struct RespondRequest {
    pub response: StudentResponse,
}

/// Reserve an independent seat
#[utoipa::path(
    post,
    path = "/reserve",
    tag = "reservations",
    security(("bearer_auth" = [])),
    request_body = ReserveRequest,
    responses(
        (status = 200, description = "Seat reserved", body = MessageResponse),
        (status = 404, description = "Seat not found"),
        (status = 409, description = "Seat is not available")
    )
)]
pub async fn reserve(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<ReserveRequest>,
) -> AppResult<Json<MessageResponse>> {
    claims.require_student()?;

    let seat = state
        .services
        .reservations
        .reserve(request.seat_id, claims.user_id)
        .await?;

    Ok(Json(MessageResponse {
        message: format!("Seat {} reserved", seat.seat_number),
    }))
}

/// Respond to an actionable reservation notification
#[utoipa::path(
    post,
    path = "/notifications/{id}/respond",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notification ID")),
    request_body = RespondRequest,
    responses(
        (status = 200, description = "Response recorded", body = MessageResponse),
        (status = 404, description = "Notification not found"),
        (status = 409, description = "Notification has already been acted upon")
    )
)]
pub async fn respond(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(notification_id): Path<i32>,
    Json(request): Json<RespondRequest>,
) -> AppResult<Json<MessageResponse>> {
    claims.require_student()?;

    let message = state
        .services
        .reservations
        .respond(notification_id, claims.user_id, request.response)
        .await?;

    Ok(Json(MessageResponse { message }))
}

/// Force-release a seat, bypassing the student response path
#[utoipa::path(
    put,
    path = "/releasebystaff/{seat_id}",
    tag = "reservations",
    security(("bearer_auth" = [])),
    params(("seat_id" = i32, Path, description = "Seat ID")),
    responses(
        (status = 200, description = "Seat released", body = Seat),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Seat not found"),
        (status = 409, description = "Seat is not currently reserved")
    )
)]
pub async fn release_by_staff(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(seat_id): Path<i32>,
) -> AppResult<Json<Seat>> {
    claims.require_staff()?;

    let seat = state.services.reservations.release_by_staff(seat_id).await?;
    Ok(Json(seat))
}
