use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::circulation::domain::model::BorrowEntity;
use crate::circulation::repository::BorrowRepository;
use crate::utils::ddb::{delete_item, get_item, put_new_item, put_versioned_item, query_index, IndexQuery};

#[derive(Debug)]
pub(crate) struct DDBBorrowRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBBorrowRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BorrowEntity> for DDBBorrowRepository {
    async fn create(&self, entity: &BorrowEntity) -> LibraryResult<usize> {
        put_new_item(&self.client, self.table_name.as_str(), "borrow_id", entity).await
    }

    async fn update(&self, entity: &BorrowEntity) -> LibraryResult<usize> {
        put_versioned_item(&self.client, self.table_name.as_str(), entity.borrow_id.as_str(), entity, entity.version).await
    }

    async fn get(&self, id: &str) -> LibraryResult<BorrowEntity> {
        get_item(&self.client, self.table_name.as_str(), "borrow_id", id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        delete_item(&self.client, self.table_name.as_str(), "borrow_id", id).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BorrowEntity>> {
        let index = IndexQuery {
            table_name: self.table_name.as_str(),
            index_name: self.index_name.as_str(),
            hash_key: "borrow_status",
            range_key: "due_at",
            default_hash: None,
        };
        query_index(&self.client, &index, predicate, page, page_size).await
    }
}

impl BorrowRepository for DDBBorrowRepository {}
