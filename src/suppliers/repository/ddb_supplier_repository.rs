use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::suppliers::domain::model::SupplierEntity;
use crate::suppliers::repository::SupplierRepository;
use crate::utils::ddb::{delete_item, get_item, put_new_item, put_versioned_item, query_index, IndexQuery};

#[derive(Debug)]
pub(crate) struct DDBSupplierRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBSupplierRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<SupplierEntity> for DDBSupplierRepository {
    async fn create(&self, entity: &SupplierEntity) -> LibraryResult<usize> {
        put_new_item(&self.client, self.table_name.as_str(), "supplier_id", entity).await
    }

    async fn update(&self, entity: &SupplierEntity) -> LibraryResult<usize> {
        put_versioned_item(&self.client, self.table_name.as_str(), entity.supplier_id.as_str(), entity, entity.version).await
    }

    async fn get(&self, id: &str) -> LibraryResult<SupplierEntity> {
        get_item(&self.client, self.table_name.as_str(), "supplier_id", id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        delete_item(&self.client, self.table_name.as_str(), "supplier_id", id).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<SupplierEntity>> {
        let index = IndexQuery {
            table_name: self.table_name.as_str(),
            index_name: self.index_name.as_str(),
            hash_key: "branch_id",
            range_key: "supplier_name",
            default_hash: None,
        };
        query_index(&self.client, &index, predicate, page, page_size).await
    }
}

impl SupplierRepository for DDBSupplierRepository {}
