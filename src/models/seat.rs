//! Seat model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::SeatKind;

/// Seat row from database.
///
/// Occupancy invariant: `is_available == true` iff `reserved_by IS NULL`.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Seat {
    pub id: i32,
    /// Unique seat number shown to users
    pub seat_number: String,
    /// "book" or "independent"
    pub kind: String,
    pub location: Option<String>,
    pub direction: Option<String>,
    pub description: Option<String>,
    pub is_available: bool,
    /// Student currently occupying the seat
    pub reserved_by: Option<i32>,
    pub reserved_at: Option<DateTime<Utc>>,
    pub released_at: Option<DateTime<Utc>>,
    /// Staff account that registered the seat
    pub managed_by: i32,
    pub created_at: DateTime<Utc>,
}

impl Seat {
    pub fn kind(&self) -> SeatKind {
        self.kind.parse().unwrap_or(SeatKind::Book)
    }
}

/// Create seat request (staff)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSeat {
    #[validate(length(min = 1, max = 16))]
    pub seat_number: String,
    pub kind: SeatKind,
    pub location: Option<String>,
    pub direction: Option<String>,
    pub description: Option<String>,
}

/// Update seat request (staff); occupancy fields are engine-owned
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSeat {
    #[validate(length(min = 1, max = 16))]
    pub seat_number: Option<String>,
    pub location: Option<String>,
    pub direction: Option<String>,
    pub description: Option<String>,
}

/// Seat listing filters
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SeatQuery {
    pub kind: Option<SeatKind>,
    pub available: Option<bool>,
    pub location: Option<String>,
}
