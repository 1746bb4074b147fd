//! Book catalog and borrow request service

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::{
        book::{Book, BookQuery, BorrowRequest, CreateBook, UpdateBook},
        enums::BorrowRequestStatus,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_books(&self, query: BookQuery) -> AppResult<Vec<Book>> {
        self.repository.books.list(&query).await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    pub async fn create_book(&self, book: CreateBook, added_by: i32) -> AppResult<Book> {
        self.repository.books.create(&book, added_by).await
    }

    pub async fn update_book(&self, id: i32, book: UpdateBook) -> AppResult<Book> {
        self.repository.books.update(id, &book).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// Student asks to borrow a book
    pub async fn request_borrow(&self, book_id: i32, student_id: i32) -> AppResult<BorrowRequest> {
        let book = self.repository.books.get_by_id(book_id).await?;
        if book.available_copies <= 0 {
            return Err(AppError::BusinessRule(
                ErrorCode::NoCopiesAvailable,
                "No copies of this book are available".to_string(),
            ));
        }
        self.repository.books.create_request(book_id, student_id).await
    }

    /// Requests visible to the caller: students see their own, staff see all
    pub async fn list_requests(&self, student_id: Option<i32>) -> AppResult<Vec<BorrowRequest>> {
        self.repository.books.list_requests(student_id).await
    }

    /// Staff decision on a request
    pub async fn decide_request(
        &self,
        request_id: i32,
        status: BorrowRequestStatus,
    ) -> AppResult<BorrowRequest> {
        match status {
            BorrowRequestStatus::Approved => self.repository.books.approve_request(request_id).await,
            BorrowRequestStatus::Rejected => self.repository.books.reject_request(request_id).await,
            BorrowRequestStatus::Returned => self.repository.books.return_request(request_id).await,
            BorrowRequestStatus::Pending => Err(AppError::BadRequest(
                "A request cannot be set back to pending".to_string(),
            )),
        }
    }
}
