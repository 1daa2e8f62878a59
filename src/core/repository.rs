use async_trait::async_trait;
use std::collections::HashMap;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::gateway::GatewayPublisherVia;
use crate::utils::date::format_date;

// largest page requested when draining a query
pub(crate) const MAX_PAGE_SIZE: usize = 500;

// Predicate keys name an attribute, optionally followed by an operator, e.g. `due_at:<=`
// or `title:contains`. Without an operator the attribute must be equal to the value.
#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity, failing with DuplicateKey if it already exists
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // updates an entity if its version still matches the stored one
    async fn update(&self, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> LibraryResult<Entity>;

    // delete an entity
    async fn delete(&self, id: &str) -> LibraryResult<usize>;

    // query the secondary index of the aggregate
    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<Entity>>;
}

// query_all follows next-page tokens until the query is exhausted
pub(crate) async fn query_all<Entity, R>(repository: &R, predicate: &HashMap<String, String>) -> LibraryResult<Vec<Entity>>
    where R: Repository<Entity> + ?Sized {
    let mut records = vec![];
    let mut page: Option<String> = None;
    loop {
        let res = repository.query(predicate, page.as_deref(), MAX_PAGE_SIZE).await?;
        records.extend(res.records);
        match res.next_page {
            Some(next) => page = Some(next),
            None => break,
        }
    }
    Ok(records)
}

// versioned_document returns the stored form of an updated entity: version bumped, updated_at now
pub(crate) fn versioned_document<Entity: Serialize>(entity: &Entity, version: i64) -> LibraryResult<Value> {
    let mut value = serde_json::to_value(entity)?;
    if let Value::Object(ref mut map) = value {
        map.insert("version".to_string(), Value::from(version + 1));
        map.insert("updated_at".to_string(), Value::from(format_date(Utc::now().naive_utc())));
    }
    Ok(value)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    InMemory,
}

impl RepositoryStore {
    pub fn gateway_publisher(&self) -> GatewayPublisherVia {
        match self {
            RepositoryStore::DynamoDB => GatewayPublisherVia::Sns,
            RepositoryStore::LocalDynamoDB => GatewayPublisherVia::LocalDynamoDB,
            RepositoryStore::InMemory => GatewayPublisherVia::InMemory,
        }
    }

    // BOOKHIVE_STORE selects the backing store: dynamodb, local (default) or memory
    pub fn from_env() -> Self {
        match std::env::var("BOOKHIVE_STORE").unwrap_or_default().to_lowercase().as_str() {
            "dynamodb" | "ddb" | "prod" => RepositoryStore::DynamoDB,
            "memory" | "in-memory" => RepositoryStore::InMemory,
            _ => RepositoryStore::LocalDynamoDB,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::repository::{versioned_document, RepositoryStore};
    use crate::gateway::GatewayPublisherVia;

    #[tokio::test]
    async fn test_should_bump_version_of_document() {
        let entity = HashMap::from([("title", "Dune")]);
        let doc = versioned_document(&entity, 3).expect("should serialize");
        assert_eq!(4, doc["version"].as_i64().unwrap());
        assert_eq!("Dune", doc["title"].as_str().unwrap());
        assert!(doc["updated_at"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_should_pick_publisher_for_store() {
        assert_eq!(GatewayPublisherVia::Sns, RepositoryStore::DynamoDB.gateway_publisher());
        assert_eq!(GatewayPublisherVia::LocalDynamoDB, RepositoryStore::LocalDynamoDB.gateway_publisher());
        assert_eq!(GatewayPublisherVia::InMemory, RepositoryStore::InMemory.gateway_publisher());
    }
}
