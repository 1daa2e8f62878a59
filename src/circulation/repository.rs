pub mod ddb_borrow_repository;

use std::collections::HashMap;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::circulation::domain::model::BorrowEntity;
use crate::core::library::{BorrowStatus, LibraryResult, PaginatedResult};
use crate::core::repository::{query_all, Repository};
use crate::utils::date::format_date;
use crate::utils::memdb::MemRepository;

// Borrows are indexed by (borrow_status, due_at) so active loans come back in due order.
#[async_trait]
pub(crate) trait BorrowRepository: Repository<BorrowEntity> {
    async fn find_by_status(&self, status: BorrowStatus, student_id: Option<&str>,
                            book_id: Option<&str>) -> LibraryResult<Vec<BorrowEntity>> {
        let mut predicate = HashMap::from([("borrow_status".to_string(), status.to_string())]);
        if let Some(student_id) = student_id {
            predicate.insert("student_id".to_string(), student_id.to_string());
        }
        if let Some(book_id) = book_id {
            predicate.insert("book_id".to_string(), book_id.to_string());
        }
        query_all(self, &predicate).await
    }

    async fn find_overdue(&self, predicate: &HashMap<String, String>, now: NaiveDateTime,
                          page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BorrowEntity>> {
        let mut predicate = predicate.clone();
        predicate.insert("borrow_status".to_string(), BorrowStatus::Borrowed.to_string());
        predicate.insert("due_at:<".to_string(), format_date(now));
        self.query(&predicate, page, page_size).await
    }
}

impl BorrowRepository for MemRepository<BorrowEntity> {}
