pub mod ddb_order_repository;

use std::collections::HashMap;
use async_trait::async_trait;
use crate::core::library::{LibraryResult, OrderStatus};
use crate::core::repository::{query_all, Repository};
use crate::orders::domain::model::OrderEntity;
use crate::utils::memdb::MemRepository;

// Orders are indexed by (order_status, ordered_at).
#[async_trait]
pub(crate) trait OrderRepository: Repository<OrderEntity> {
    async fn find_by_status(&self, status: OrderStatus, student_id: Option<&str>) -> LibraryResult<Vec<OrderEntity>> {
        let mut predicate = HashMap::from([("order_status".to_string(), status.to_string())]);
        if let Some(student_id) = student_id {
            predicate.insert("student_id".to_string(), student_id.to_string());
        }
        query_all(self, &predicate).await
    }

    // across every status, in no particular order
    async fn find_all(&self, student_id: Option<&str>) -> LibraryResult<Vec<OrderEntity>> {
        let mut orders = vec![];
        for status in OrderStatus::all() {
            orders.extend(self.find_by_status(status, student_id).await?);
        }
        Ok(orders)
    }
}

impl OrderRepository for MemRepository<OrderEntity> {}
