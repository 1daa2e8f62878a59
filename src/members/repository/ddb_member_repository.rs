use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::members::domain::model::MemberEntity;
use crate::members::repository::MemberRepository;
use crate::utils::ddb::{delete_item, get_item, put_new_item, put_versioned_item, query_index, IndexQuery};

#[derive(Debug)]
pub(crate) struct DDBMemberRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBMemberRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<MemberEntity> for DDBMemberRepository {
    async fn create(&self, entity: &MemberEntity) -> LibraryResult<usize> {
        put_new_item(&self.client, self.table_name.as_str(), "member_id", entity).await
    }

    async fn update(&self, entity: &MemberEntity) -> LibraryResult<usize> {
        put_versioned_item(&self.client, self.table_name.as_str(), entity.member_id.as_str(), entity, entity.version).await
    }

    async fn get(&self, id: &str) -> LibraryResult<MemberEntity> {
        get_item(&self.client, self.table_name.as_str(), "member_id", id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        delete_item(&self.client, self.table_name.as_str(), "member_id", id).await
    }

    // members are indexed by (member_role, username)
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<MemberEntity>> {
        let index = IndexQuery {
            table_name: self.table_name.as_str(),
            index_name: self.index_name.as_str(),
            hash_key: "member_role",
            range_key: "username",
            default_hash: None,
        };
        query_index(&self.client, &index, predicate, page, page_size).await
    }
}

impl MemberRepository for DDBMemberRepository {}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::core::library::{LibraryError, Role};
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::members::domain::model::MemberEntity;
    use crate::members::repository::ddb_member_repository::DDBMemberRepository;
    use crate::members::repository::MemberRepository;
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "members").await;
                let _ = create_table(&client, "members", "member_id", "member_role", "username").await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on BOOKHIVE_DDB_ENDPOINT"]
    async fn test_should_create_update_find_members() {
        let repo = DDBMemberRepository::new(CLIENT.get().await.clone(), "members", "members_ndx");
        let username = Uuid::new_v4().to_string();
        let mut member = MemberEntity::new(Role::Student, username.as_str(), "Ada", "ada@uni.edu", "hash");
        assert_eq!(1, repo.create(&member).await.expect("should create member"));
        assert!(matches!(repo.create(&member).await, Err(LibraryError::DuplicateKey { .. })));

        member.full_name = "Ada Lovelace".to_string();
        assert_eq!(1, repo.update(&member).await.expect("should update member"));
        assert!(matches!(repo.update(&member).await, Err(LibraryError::CurrentlyUnavailable { .. })));

        let loaded = repo.find_by_username(Role::Student, username.as_str()).await
            .expect("should query").expect("should find member");
        assert_eq!("Ada Lovelace", loaded.full_name.as_str());
        assert_eq!(1, loaded.version);
        assert_eq!(1, repo.delete(member.member_id.as_str()).await.expect("should delete member"));
        assert!(repo.get(member.member_id.as_str()).await.is_err());
    }
}
