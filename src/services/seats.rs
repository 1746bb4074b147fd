//! Seat management service (staff CRUD; occupancy belongs to the engine)

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::seat::{CreateSeat, Seat, SeatQuery, UpdateSeat},
    repository::Repository,
};

#[derive(Clone)]
pub struct SeatsService {
    repository: Repository,
}

impl SeatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new seat
    pub async fn create_seat(&self, seat: CreateSeat, managed_by: i32) -> AppResult<Seat> {
        if self.repository.seats.number_exists(&seat.seat_number, None).await? {
            return Err(AppError::Conflict(ErrorCode::Duplicate, "Seat number already exists".to_string()));
        }
        self.repository.seats.create(&seat, managed_by).await
    }

    /// Get seat by ID
    pub async fn get_seat(&self, id: i32) -> AppResult<Seat> {
        self.repository.seats.get_by_id(id).await
    }

    /// List seats with filters
    pub async fn list_seats(&self, query: SeatQuery) -> AppResult<Vec<Seat>> {
        self.repository.seats.list(&query).await
    }

    /// Update a seat's descriptive fields
    pub async fn update_seat(&self, id: i32, seat: UpdateSeat) -> AppResult<Seat> {
        if let Some(ref number) = seat.seat_number {
            if self.repository.seats.number_exists(number, Some(id)).await? {
                return Err(AppError::Conflict(ErrorCode::Duplicate, "Seat number already exists".to_string()));
            }
        }
        self.repository.seats.update(id, &seat).await
    }

    /// Remove a seat (rejected while it has an active reservation)
    pub async fn delete_seat(&self, id: i32) -> AppResult<()> {
        self.repository.seats.delete(id).await
    }
}
