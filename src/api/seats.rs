//! Seat management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::seat::{CreateSeat, Seat, SeatQuery, UpdateSeat},
};

use super::AuthenticatedUser;

/// List seats with optional filters
#[utoipa::path(
    get,
    path = "/seats",
    tag = "seats",
    security(("bearer_auth" = [])),
    params(
        ("kind" = Option<String>, Query, description = "Seat kind (book|independent)"),
        ("available" = Option<bool>, Query, description = "Availability filter"),
        ("location" = Option<String>, Query, description = "Location filter")
    ),
    responses(
        (status = 200, description = "Seats", body = Vec<Seat>)
    )
)]
pub async fn list_seats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<SeatQuery>,
) -> AppResult<Json<Vec<Seat>>> {
    let seats = state.services.seats.list_seats(query).await?;
    Ok(Json(seats))
}

/// Get a seat by ID
#[utoipa::path(
    get,
    path = "/seats/{id}",
    tag = "seats",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Seat ID")),
    responses(
        (status = 200, description = "Seat", body = Seat),
        (status = 404, description = "Seat not found")
    )
)]
pub async fn get_seat(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(seat_id): Path<i32>,
) -> AppResult<Json<Seat>> {
    let seat = state.services.seats.get_seat(seat_id).await?;
    Ok(Json(seat))
}

/// Register a new seat
#[utoipa::path(
    post,
    path = "/seats",
    tag = "seats",
    security(("bearer_auth" = [])),
    request_body = CreateSeat,
    responses(
        (status = 201, description = "Seat registered", body = Seat),
        (status = 403, description = "Staff privileges required"),
        (status = 409, description = "Seat number already exists")
    )
)]
pub async fn create_seat(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateSeat>,
) -> AppResult<(StatusCode, Json<Seat>)> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let seat = state
        .services
        .seats
        .create_seat(request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(seat)))
}

/// Update a seat's descriptive fields
#[utoipa::path(
    put,
    path = "/seats/{id}",
    tag = "seats",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Seat ID")),
    request_body = UpdateSeat,
    responses(
        (status = 200, description = "Seat updated", body = Seat),
        (status = 404, description = "Seat not found")
    )
)]
pub async fn update_seat(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(seat_id): Path<i32>,
    Json(request): Json<UpdateSeat>,
) -> AppResult<Json<Seat>> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let seat = state.services.seats.update_seat(seat_id, request).await?;
    Ok(Json(seat))
}

/// Remove a seat
#[utoipa::path(
    delete,
    path = "/seats/{id}",
    tag = "seats",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Seat ID")),
    responses(
        (status = 204, description = "Seat removed"),
        (status = 404, description = "Seat not found"),
        (status = 409, description = "Seat has an active reservation")
    )
)]
pub async fn delete_seat(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(seat_id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;

    state.services.seats.delete_seat(seat_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
