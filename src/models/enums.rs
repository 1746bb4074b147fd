//! Shared domain enums

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// AccountType
// ---------------------------------------------------------------------------

/// Account type slug stored on the user row and in JWT claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Student,
    Librarian,
    Admin,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Student => "student",
            AccountType::Librarian => "librarian",
            AccountType::Admin => "admin",
        }
    }

    /// Library staff: librarians and admins
    pub fn is_staff(&self) -> bool {
        matches!(self, AccountType::Librarian | AccountType::Admin)
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(AccountType::Student),
            "librarian" => Ok(AccountType::Librarian),
            "admin" => Ok(AccountType::Admin),
            other => Err(format!("unknown account type: {}", other)),
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SeatKind
// ---------------------------------------------------------------------------

/// Kind of physical seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SeatKind {
    /// Seat attached to the book-reading area
    Book,
    /// Independent-study seat, subject to the reminder/auto-release cycle
    Independent,
}

impl SeatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatKind::Book => "book",
            SeatKind::Independent => "independent",
        }
    }
}

impl FromStr for SeatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "book" => Ok(SeatKind::Book),
            "independent" => Ok(SeatKind::Independent),
            other => Err(format!("unknown seat kind: {}", other)),
        }
    }
}

impl std::fmt::Display for SeatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NotificationType
// ---------------------------------------------------------------------------

/// Classification of a seat notification row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Initial,
    Reminder,
    Release,
    Extension,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Initial => "initial",
            NotificationType::Reminder => "reminder",
            NotificationType::Release => "release",
            NotificationType::Extension => "extension",
        }
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initial" => Ok(NotificationType::Initial),
            "reminder" => Ok(NotificationType::Reminder),
            "release" => Ok(NotificationType::Release),
            "extension" => Ok(NotificationType::Extension),
            other => Err(format!("unknown notification type: {}", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// ActionResponse
// ---------------------------------------------------------------------------

/// Outcome of an actionable notification. `Pending` marks an open decision
/// window; informational rows carry no action response at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionResponse {
    Pending,
    Extend,
    Release,
    AutoRelease,
    Expired,
}

impl ActionResponse {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionResponse::Pending => "pending",
            ActionResponse::Extend => "extend",
            ActionResponse::Release => "release",
            ActionResponse::AutoRelease => "auto_release",
            ActionResponse::Expired => "expired",
        }
    }
}

impl FromStr for ActionResponse {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ActionResponse::Pending),
            "extend" => Ok(ActionResponse::Extend),
            "release" => Ok(ActionResponse::Release),
            "auto_release" => Ok(ActionResponse::AutoRelease),
            "expired" => Ok(ActionResponse::Expired),
            other => Err(format!("unknown action response: {}", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// BorrowRequestStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a book borrow request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BorrowRequestStatus {
    Pending,
    Approved,
    Rejected,
    Returned,
}

impl BorrowRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowRequestStatus::Pending => "pending",
            BorrowRequestStatus::Approved => "approved",
            BorrowRequestStatus::Rejected => "rejected",
            BorrowRequestStatus::Returned => "returned",
        }
    }
}

impl FromStr for BorrowRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BorrowRequestStatus::Pending),
            "approved" => Ok(BorrowRequestStatus::Approved),
            "rejected" => Ok(BorrowRequestStatus::Rejected),
            "returned" => Ok(BorrowRequestStatus::Returned),
            other => Err(format!("unknown borrow request status: {}", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// TicketStatus
// ---------------------------------------------------------------------------

/// Support ticket status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Closed => "closed",
        }
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TicketStatus::Open),
            "in_progress" => Ok(TicketStatus::InProgress),
            "closed" => Ok(TicketStatus::Closed),
            other => Err(format!("unknown ticket status: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_type_round_trip() {
        for slug in ["student", "librarian", "admin"] {
            let parsed: AccountType = slug.parse().unwrap();
            assert_eq!(parsed.as_str(), slug);
        }
        assert!("visitor".parse::<AccountType>().is_err());
    }

    #[test]
    fn staff_covers_librarian_and_admin() {
        assert!(!AccountType::Student.is_staff());
        assert!(AccountType::Librarian.is_staff());
        assert!(AccountType::Admin.is_staff());
    }

    #[test]
    fn action_response_round_trip() {
        for slug in ["pending", "extend", "release", "auto_release", "expired"] {
            let parsed: ActionResponse = slug.parse().unwrap();
            assert_eq!(parsed.as_str(), slug);
        }
    }

    #[test]
    fn action_response_serde_matches_str_form() {
        let json = serde_json::to_string(&ActionResponse::AutoRelease).unwrap();
        assert_eq!(json, "\"auto_release\"");
    }
}
