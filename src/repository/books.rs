//! Book catalog and borrow requests repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::{
        book::{Book, BookQuery, BorrowRequest, CreateBook, UpdateBook},
        enums::BorrowRequestStatus,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchBook, format!("Book with id {} not found", id)))
    }

    /// List books with optional filters (case-insensitive substring match)
    pub async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE ($1::text IS NULL OR title ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR author ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR category = $3)
            ORDER BY title
            "#,
        )
        .bind(&query.title)
        .bind(&query.author)
        .bind(&query.category)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Add a book to the catalog
    pub async fn create(&self, book: &CreateBook, added_by: i32) -> AppResult<Book> {
        if let Some(ref isbn) = book.isbn {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)")
                    .bind(isbn)
                    .fetch_one(&self.pool)
                    .await?;
            if exists {
                return Err(AppError::Conflict(
                    ErrorCode::Duplicate,
                    "A book with this ISBN already exists".to_string(),
                ));
            }
        }

        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn, category, total_copies, available_copies, added_by)
            VALUES ($1, $2, $3, $4, $5, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(&book.category)
        .bind(book.total_copies)
        .bind(added_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update a book. Raising `total_copies` raises `available_copies` by
    /// the same amount.
    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                isbn = COALESCE($4, isbn),
                category = COALESCE($5, category),
                available_copies = available_copies + COALESCE($6 - total_copies, 0),
                total_copies = COALESCE($6, total_copies)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(&book.category)
        .bind(book.total_copies)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchBook, format!("Book with id {} not found", id)))?;

        Ok(updated)
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(ErrorCode::NoSuchBook, format!("Book with id {} not found", id)));
        }

        Ok(())
    }

    /// Get borrow request by ID
    pub async fn get_request(&self, id: i32) -> AppResult<BorrowRequest> {
        sqlx::query_as::<_, BorrowRequest>("SELECT * FROM borrow_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchData, format!("Borrow request with id {} not found", id)))
    }

    /// Create a pending borrow request
    pub async fn create_request(&self, book_id: i32, student_id: i32) -> AppResult<BorrowRequest> {
        let open_request: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM borrow_requests
                WHERE book_id = $1 AND student_id = $2 AND status IN ('pending', 'approved')
            )
            "#,
        )
        .bind(book_id)
        .bind(student_id)
        .fetch_one(&self.pool)
        .await?;

        if open_request {
            return Err(AppError::Conflict(
                ErrorCode::Duplicate,
                "An open request for this book already exists".to_string(),
            ));
        }

        let request = sqlx::query_as::<_, BorrowRequest>(
            r#"
            INSERT INTO borrow_requests (book_id, student_id, status)
            VALUES ($1, $2, 'pending')
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(student_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    /// List borrow requests, all or for one student
    pub async fn list_requests(&self, student_id: Option<i32>) -> AppResult<Vec<BorrowRequest>> {
        let requests = sqlx::query_as::<_, BorrowRequest>(
            r#"
            SELECT * FROM borrow_requests
            WHERE ($1::int IS NULL OR student_id = $1)
            ORDER BY requested_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    /// Approve a pending request, decrementing available copies. The
    /// guarded UPDATE keeps the copy count from going negative under
    /// concurrent approvals.
    pub async fn approve_request(&self, id: i32) -> AppResult<BorrowRequest> {
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, BorrowRequest>(
            "SELECT * FROM borrow_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchData, format!("Borrow request with id {} not found", id)))?;

        if request.status() != BorrowRequestStatus::Pending {
            return Err(AppError::Conflict(
                ErrorCode::AlreadyActedUpon,
                "Request has already been decided".to_string(),
            ));
        }

        let decremented = sqlx::query(
            "UPDATE books SET available_copies = available_copies - 1 WHERE id = $1 AND available_copies > 0",
        )
        .bind(request.book_id)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            return Err(AppError::BusinessRule(
                ErrorCode::NoCopiesAvailable,
                "No copies of this book are available".to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, BorrowRequest>(
            "UPDATE borrow_requests SET status = 'approved', decided_at = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Reject a pending request
    pub async fn reject_request(&self, id: i32) -> AppResult<BorrowRequest> {
        let request = self.get_request(id).await?;
        if request.status() != BorrowRequestStatus::Pending {
            return Err(AppError::Conflict(
                ErrorCode::AlreadyActedUpon,
                "Request has already been decided".to_string(),
            ));
        }

        let updated = sqlx::query_as::<_, BorrowRequest>(
            "UPDATE borrow_requests SET status = 'rejected', decided_at = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Mark an approved request returned, restoring the copy
    pub async fn return_request(&self, id: i32) -> AppResult<BorrowRequest> {
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, BorrowRequest>(
            "SELECT * FROM borrow_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(ErrorCode::NoSuchData, format!("Borrow request with id {} not found", id)))?;

        if request.status() != BorrowRequestStatus::Approved {
            return Err(AppError::Conflict(
                ErrorCode::AlreadyActedUpon,
                "Only approved requests can be returned".to_string(),
            ));
        }

        sqlx::query("UPDATE books SET available_copies = available_copies + 1 WHERE id = $1")
            .bind(request.book_id)
            .execute(&mut *tx)
            .await?;

        let updated = sqlx::query_as::<_, BorrowRequest>(
            "UPDATE borrow_requests SET status = 'returned', returned_at = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }
}
