use std::collections::HashMap;
use async_trait::async_trait;
use crate::circulation::dto::BorrowDto;
use crate::core::library::{LibraryResult, PaginatedResult};

pub mod model;
pub mod penalty;
pub mod service;

#[async_trait]
pub(crate) trait CirculationService: Sync + Send {
    async fn borrow(&self, student_id: &str, book_id: &str) -> LibraryResult<BorrowDto>;
    async fn return_book(&self, borrow_id: &str) -> LibraryResult<BorrowDto>;
    async fn report_lost(&self, borrow_id: &str) -> LibraryResult<BorrowDto>;
    // active borrows of one student, or of everyone
    async fn list_borrowed(&self, student_id: Option<&str>) -> LibraryResult<Vec<BorrowDto>>;
    async fn book_history(&self, book_id: &str) -> LibraryResult<Vec<BorrowDto>>;
    async fn query_overdue(&self, predicate: &HashMap<String, String>,
                           page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BorrowDto>>;
}
