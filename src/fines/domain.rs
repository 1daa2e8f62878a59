pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::fines::dto::FineDto;

#[async_trait]
pub(crate) trait FineService: Sync + Send {
    async fn assess_fine(&self, student_id: &str, borrow_id: &str, amount_cents: i64, reason: &str) -> LibraryResult<FineDto>;
    async fn list_unpaid(&self, student_id: &str) -> LibraryResult<Vec<FineDto>>;
    // newest first
    async fn list_fines(&self, student_id: &str) -> LibraryResult<Vec<FineDto>>;
    async fn outstanding_balance(&self, student_id: &str) -> LibraryResult<i64>;
    async fn pay(&self, student_id: &str, fine_id: &str) -> LibraryResult<FineDto>;
}
