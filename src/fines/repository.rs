pub mod ddb_fine_repository;

use std::collections::HashMap;
use async_trait::async_trait;
use crate::core::library::{LibraryResult, PaymentStatus};
use crate::core::repository::{query_all, Repository};
use crate::fines::domain::model::FineEntity;
use crate::utils::memdb::MemRepository;

// Fines are indexed by (student_id, payment_status).
#[async_trait]
pub(crate) trait FineRepository: Repository<FineEntity> {
    async fn find_by_student(&self, student_id: &str, status: Option<PaymentStatus>) -> LibraryResult<Vec<FineEntity>> {
        let mut predicate = HashMap::from([("student_id".to_string(), student_id.to_string())]);
        if let Some(status) = status {
            predicate.insert("payment_status".to_string(), status.to_string());
        }
        query_all(self, &predicate).await
    }
}

impl FineRepository for MemRepository<FineEntity> {}
