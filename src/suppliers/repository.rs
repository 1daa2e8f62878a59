pub mod ddb_supplier_repository;

use std::collections::HashMap;
use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::core::repository::{query_all, Repository};
use crate::suppliers::domain::model::SupplierEntity;
use crate::utils::memdb::MemRepository;

// Suppliers are indexed by (branch_id, supplier_name).
#[async_trait]
pub(crate) trait SupplierRepository: Repository<SupplierEntity> {
    async fn find_all(&self, branch_id: &str) -> LibraryResult<Vec<SupplierEntity>> {
        let predicate = HashMap::from([("branch_id".to_string(), branch_id.to_string())]);
        query_all(self, &predicate).await
    }
}

impl SupplierRepository for MemRepository<SupplierEntity> {}
