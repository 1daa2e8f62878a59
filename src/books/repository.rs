pub mod ddb_book_repository;

use std::collections::HashMap;
use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::{BookStatus, LibraryResult, PaginatedResult};
use crate::core::repository::{query_all, Repository};
use crate::utils::memdb::MemRepository;

// Books are indexed by (branch_id, title).
#[async_trait]
pub(crate) trait BookRepository: Repository<BookEntity> {
    async fn find_by_status(&self, branch_id: &str, status: BookStatus,
                            page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        let predicate = HashMap::from([
            ("branch_id".to_string(), branch_id.to_string()),
            ("book_status".to_string(), status.to_string()),
        ]);
        self.query(&predicate, page, page_size).await
    }

    // search matches the keyword anywhere in title, author or genre, ignoring case
    async fn search(&self, branch_id: &str, keyword: &str) -> LibraryResult<Vec<BookEntity>> {
        let predicate = HashMap::from([
            ("branch_id".to_string(), branch_id.to_string()),
            ("search_text:contains".to_string(), keyword.trim().to_lowercase()),
        ]);
        query_all(self, &predicate).await
    }

    async fn find_by_title_author(&self, branch_id: &str, title: &str, author: &str) -> LibraryResult<Vec<BookEntity>> {
        let predicate = HashMap::from([
            ("branch_id".to_string(), branch_id.to_string()),
            ("title".to_string(), title.trim().to_string()),
            ("author".to_string(), author.trim().to_string()),
        ]);
        query_all(self, &predicate).await
    }

    async fn find_by_supplier(&self, branch_id: &str, supplier_id: &str) -> LibraryResult<Vec<BookEntity>> {
        let predicate = HashMap::from([
            ("branch_id".to_string(), branch_id.to_string()),
            ("supplier_id".to_string(), supplier_id.to_string()),
        ]);
        query_all(self, &predicate).await
    }

    async fn find_all(&self, branch_id: &str) -> LibraryResult<Vec<BookEntity>> {
        let predicate = HashMap::from([("branch_id".to_string(), branch_id.to_string())]);
        query_all(self, &predicate).await
    }
}

impl BookRepository for MemRepository<BookEntity> {}
