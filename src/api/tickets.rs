//! Support ticket endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::ticket::{CreateTicket, Ticket, UpdateTicket},
};

use super::AuthenticatedUser;

/// List tickets (students see their own, staff see all)
#[utoipa::path(
    get,
    path = "/tickets",
    tag = "tickets",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tickets", body = Vec<Ticket>)
    )
)]
pub async fn list(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Ticket>>> {
    let opened_by = if claims.is_staff() { None } else { Some(claims.user_id) };

    let tickets = state.services.tickets.list(opened_by).await?;
    Ok(Json(tickets))
}

/// Open a support ticket
#[utoipa::path(
    post,
    path = "/tickets",
    tag = "tickets",
    security(("bearer_auth" = [])),
    request_body = CreateTicket,
    responses(
        (status = 201, description = "Ticket opened", body = Ticket)
    )
)]
pub async fn create(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateTicket>,
) -> AppResult<(StatusCode, Json<Ticket>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let ticket = state.services.tickets.open(request, claims.user_id).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Update a ticket's status or staff note
#[utoipa::path(
    put,
    path = "/tickets/{id}",
    tag = "tickets",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Ticket ID")),
    request_body = UpdateTicket,
    responses(
        (status = 200, description = "Ticket updated", body = Ticket),
        (status = 403, description = "Staff privileges required"),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn update(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(ticket_id): Path<i32>,
    Json(request): Json<UpdateTicket>,
) -> AppResult<Json<Ticket>> {
    claims.require_staff()?;

    let ticket = state.services.tickets.update(ticket_id, request).await?;
    Ok(Json(ticket))
}
