use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::members::domain::model::SessionEntity;
use crate::members::repository::SessionRepository;
use crate::utils::ddb::{delete_item, get_item, put_new_item, put_versioned_item, query_index, IndexQuery};

#[derive(Debug)]
pub(crate) struct DDBSessionRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBSessionRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<SessionEntity> for DDBSessionRepository {
    async fn create(&self, entity: &SessionEntity) -> LibraryResult<usize> {
        put_new_item(&self.client, self.table_name.as_str(), "session_id", entity).await
    }

    async fn update(&self, entity: &SessionEntity) -> LibraryResult<usize> {
        put_versioned_item(&self.client, self.table_name.as_str(), entity.session_id.as_str(), entity, entity.version).await
    }

    async fn get(&self, id: &str) -> LibraryResult<SessionEntity> {
        get_item(&self.client, self.table_name.as_str(), "session_id", id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        delete_item(&self.client, self.table_name.as_str(), "session_id", id).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<SessionEntity>> {
        let index = IndexQuery {
            table_name: self.table_name.as_str(),
            index_name: self.index_name.as_str(),
            hash_key: "member_id",
            range_key: "expires_at",
            default_hash: None,
        };
        query_index(&self.client, &index, predicate, page, page_size).await
    }
}

impl SessionRepository for DDBSessionRepository {}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use chrono::{Duration, Utc};
    use lazy_static::lazy_static;
    use crate::core::library::Role;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::members::domain::model::{MemberEntity, SessionEntity};
    use crate::members::repository::ddb_session_repository::DDBSessionRepository;
    use crate::members::repository::SessionRepository;
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "sessions").await;
                let _ = create_table(&client, "sessions", "session_id", "member_id", "expires_at").await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on BOOKHIVE_DDB_ENDPOINT"]
    async fn test_should_purge_expired_sessions() {
        let repo = DDBSessionRepository::new(CLIENT.get().await.clone(), "sessions", "sessions_ndx");
        let member = MemberEntity::new(Role::Student, "S-1", "Ada", "ada@uni.edu", "hash");
        let expired = SessionEntity::new(&member, -5);
        let live = SessionEntity::new(&member, 30);
        repo.create(&expired).await.expect("should create session");
        repo.create(&live).await.expect("should create session");
        let removed = repo.purge_expired(member.member_id.as_str(), Utc::now().naive_utc() - Duration::seconds(1)).await
            .expect("should purge");
        assert_eq!(1, removed);
        assert!(repo.get(live.session_id.as_str()).await.is_ok());
    }
}
