use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::fines::domain::model::FineEntity;
use crate::fines::repository::FineRepository;
use crate::utils::ddb::{delete_item, get_item, put_new_item, put_versioned_item, query_index, IndexQuery};

#[derive(Debug)]
pub(crate) struct DDBFineRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBFineRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<FineEntity> for DDBFineRepository {
    async fn create(&self, entity: &FineEntity) -> LibraryResult<usize> {
        put_new_item(&self.client, self.table_name.as_str(), "fine_id", entity).await
    }

    async fn update(&self, entity: &FineEntity) -> LibraryResult<usize> {
        put_versioned_item(&self.client, self.table_name.as_str(), entity.fine_id.as_str(), entity, entity.version).await
    }

    async fn get(&self, id: &str) -> LibraryResult<FineEntity> {
        get_item(&self.client, self.table_name.as_str(), "fine_id", id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        delete_item(&self.client, self.table_name.as_str(), "fine_id", id).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<FineEntity>> {
        let index = IndexQuery {
            table_name: self.table_name.as_str(),
            index_name: self.index_name.as_str(),
            hash_key: "student_id",
            range_key: "payment_status",
            default_hash: None,
        };
        query_index(&self.client, &index, predicate, page, page_size).await
    }
}

impl FineRepository for DDBFineRepository {}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;
    use crate::core::library::PaymentStatus;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::fines::domain::model::FineEntity;
    use crate::fines::repository::ddb_fine_repository::DDBFineRepository;
    use crate::fines::repository::FineRepository;
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "fines").await;
                let _ = create_table(&client, "fines", "fine_id", "student_id", "payment_status").await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on BOOKHIVE_DDB_ENDPOINT"]
    async fn test_should_find_unpaid_fines() {
        let repo = DDBFineRepository::new(CLIENT.get().await.clone(), "fines", "fines_ndx");
        let fine = FineEntity::new("student-ddb", "borrow-1", 2000, "Overdue by 2 days");
        let mut paid = FineEntity::new("student-ddb", "borrow-2", 1000, "Overdue by 1 days");
        repo.create(&fine).await.expect("should create fine");
        repo.create(&paid).await.expect("should create fine");
        paid.payment_status = PaymentStatus::Paid;
        repo.update(&paid).await.expect("should update fine");
        let unpaid = repo.find_by_student("student-ddb", Some(PaymentStatus::Unpaid)).await.expect("should query");
        assert_eq!(vec![fine.fine_id.to_string()], unpaid.iter().map(|f| f.fine_id.to_string()).collect::<Vec<String>>());
    }
}
