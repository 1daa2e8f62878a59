use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::orders::domain::model::OrderEntity;
use crate::orders::repository::OrderRepository;
use crate::utils::ddb::{delete_item, get_item, put_new_item, put_versioned_item, query_index, IndexQuery};

#[derive(Debug)]
pub(crate) struct DDBOrderRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBOrderRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<OrderEntity> for DDBOrderRepository {
    async fn create(&self, entity: &OrderEntity) -> LibraryResult<usize> {
        put_new_item(&self.client, self.table_name.as_str(), "order_id", entity).await
    }

    async fn update(&self, entity: &OrderEntity) -> LibraryResult<usize> {
        put_versioned_item(&self.client, self.table_name.as_str(), entity.order_id.as_str(), entity, entity.version).await
    }

    async fn get(&self, id: &str) -> LibraryResult<OrderEntity> {
        get_item(&self.client, self.table_name.as_str(), "order_id", id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        delete_item(&self.client, self.table_name.as_str(), "order_id", id).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<OrderEntity>> {
        let index = IndexQuery {
            table_name: self.table_name.as_str(),
            index_name: self.index_name.as_str(),
            hash_key: "order_status",
            range_key: "ordered_at",
            default_hash: None,
        };
        query_index(&self.client, &index, predicate, page, page_size).await
    }
}

impl OrderRepository for DDBOrderRepository {}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;
    use crate::core::library::OrderStatus;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::orders::domain::model::{OrderEntity, OrderLine};
    use crate::orders::repository::ddb_order_repository::DDBOrderRepository;
    use crate::orders::repository::OrderRepository;
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "orders").await;
                let _ = create_table(&client, "orders", "order_id", "order_status", "ordered_at").await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on BOOKHIVE_DDB_ENDPOINT"]
    async fn test_should_store_order_lines() {
        let repo = DDBOrderRepository::new(CLIENT.get().await.clone(), "orders", "orders_ndx");
        let order = OrderEntity::new("main", "student-ddb", vec![OrderLine::requested("Dune", "Frank Herbert")]);
        repo.create(&order).await.expect("should create order");
        assert_eq!(order, repo.get(order.order_id.as_str()).await.expect("should get order"));
        let pending = repo.find_by_status(OrderStatus::Pending, Some("student-ddb")).await.expect("should query");
        assert_eq!(1, pending.len());
    }
}
