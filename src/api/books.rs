//! Book catalog and borrow request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{
        Book, BookQuery, BorrowRequest, CreateBook, UpdateBook, UpdateBorrowRequest,
    },
};

use super::AuthenticatedUser;

/// List books with optional filters
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("title" = Option<String>, Query, description = "Title filter"),
        ("author" = Option<String>, Query, description = "Author filter"),
        ("category" = Option<String>, Query, description = "Category filter")
    ),
    responses(
        (status = 200, description = "Books", body = Vec<Book>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books(query).await?;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(book_id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(book_id).await?;
    Ok(Json(book))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book added", body = Book),
        (status = 403, description = "Staff privileges required"),
        (status = 409, description = "ISBN already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let book = state
        .services
        .catalog
        .create_book(request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<i32>,
    Json(request): Json<UpdateBook>,
) -> AppResult<Json<Book>> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let book = state.services.catalog.update_book(book_id, request).await?;
    Ok(Json(book))
}

/// Remove a book from the catalog
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book removed"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;

    state.services.catalog.delete_book(book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Request to borrow a book
#[utoipa::path(
    post,
    path = "/books/{id}/request",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 201, description = "Request created", body = BorrowRequest),
        (status = 404, description = "Book not found"),
        (status = 409, description = "An open request already exists"),
        (status = 422, description = "No copies available")
    )
)]
pub async fn request_borrow(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(book_id): Path<i32>,
) -> AppResult<(StatusCode, Json<BorrowRequest>)> {
    claims.require_student()?;

    let request = state
        .services
        .catalog
        .request_borrow(book_id, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// List borrow requests (students see their own, staff see all)
#[utoipa::path(
    get,
    path = "/requests",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Borrow requests", body = Vec<BorrowRequest>)
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowRequest>>> {
    let student_id = if claims.is_staff() { None } else { Some(claims.user_id) };

    let requests = state.services.catalog.list_requests(student_id).await?;
    Ok(Json(requests))
}

/// Decide a borrow request (approve, reject or mark returned)
#[utoipa::path(
    put,
    path = "/requests/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateBorrowRequest,
    responses(
        (status = 200, description = "Request updated", body = BorrowRequest),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already decided")
    )
)]
pub async fn decide_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(request_id): Path<i32>,
    Json(request): Json<UpdateBorrowRequest>,
) -> AppResult<Json<BorrowRequest>> {
    claims.require_staff()?;

    let updated = state
        .services
        .catalog
        .decide_request(request_id, request.status)
        .await?;
    Ok(Json(updated))
}
