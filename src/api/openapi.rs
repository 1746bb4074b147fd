//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    announcements, auth, books, health, notifications, questions, reservations, seats, tickets,
    users,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Readspace API",
        version = "0.3.0",
        description = "Library Management and Seat Reservation REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        auth::update_profile,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Seats
        seats::list_seats,
        seats::get_seat,
        seats::create_seat,
        seats::update_seat,
        seats::delete_seat,
        // Reservations
        reservations::reserve,
        reservations::respond,
        reservations::release_by_staff,
        // Notifications
        notifications::pending,
        notifications::overview,
        notifications::mark_read,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::request_borrow,
        books::list_requests,
        books::decide_request,
        // Announcements
        announcements::list,
        announcements::create,
        announcements::update,
        announcements::delete,
        // Questions
        questions::list,
        questions::get_detail,
        questions::create,
        questions::answer,
        // Tickets
        tickets::list,
        tickets::create,
        tickets::update,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Users
            crate::models::user::UserInfo,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            crate::models::user::UpdateProfile,
            // Seats
            crate::models::seat::Seat,
            crate::models::seat::CreateSeat,
            crate::models::seat::UpdateSeat,
            // Reservations
            reservations::ReserveRequest,
            reservations::RespondRequest,
            reservations::MessageResponse,
            crate::models::notification::StudentResponse,
            // Notifications
            crate::models::notification::SeatNotification,
            crate::models::notification::PendingNotification,
            crate::models::notification::NotificationOverview,
            crate::models::notification::NotificationCounts,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::BorrowRequest,
            crate::models::book::UpdateBorrowRequest,
            // Announcements
            crate::models::announcement::Announcement,
            crate::models::announcement::CreateAnnouncement,
            // Questions
            crate::models::question::Question,
            crate::models::question::QuestionSummary,
            crate::models::question::QuestionDetail,
            crate::models::question::Answer,
            crate::models::question::CreateQuestion,
            crate::models::question::CreateAnswer,
            // Tickets
            crate::models::ticket::Ticket,
            crate::models::ticket::CreateTicket,
            crate::models::ticket::UpdateTicket,
            // Enums
            crate::models::enums::AccountType,
            crate::models::enums::SeatKind,
            crate::models::enums::NotificationType,
            crate::models::enums::ActionResponse,
            crate::models::enums::BorrowRequestStatus,
            crate::models::enums::TicketStatus,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User management"),
        (name = "seats", description = "Seat management"),
        (name = "reservations", description = "Seat reservation lifecycle"),
        (name = "notifications", description = "Reservation notifications"),
        (name = "books", description = "Book catalog and borrow requests"),
        (name = "announcements", description = "Announcements"),
        (name = "questions", description = "Community Q&A hub"),
        (name = "tickets", description = "Support tickets")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
