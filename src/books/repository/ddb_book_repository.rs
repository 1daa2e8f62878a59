use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{delete_item, get_item, put_new_item, put_versioned_item, query_index, IndexQuery};

#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        put_new_item(&self.client, self.table_name.as_str(), "book_id", entity).await
    }

    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        put_versioned_item(&self.client, self.table_name.as_str(), entity.book_id.as_str(), entity, entity.version).await
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        get_item(&self.client, self.table_name.as_str(), "book_id", id).await
    }

    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        delete_item(&self.client, self.table_name.as_str(), "book_id", id).await
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        let index = IndexQuery {
            table_name: self.table_name.as_str(),
            index_name: self.index_name.as_str(),
            hash_key: "branch_id",
            range_key: "title",
            default_hash: None,
        };
        query_index(&self.client, &index, predicate, page, page_size).await
    }
}

impl BookRepository for DDBBookRepository {}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::books::domain::model::BookEntity;
    use crate::books::repository::BookRepository;
    use crate::books::repository::ddb_book_repository::DDBBookRepository;
    use crate::core::library::BookStatus;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "books").await;
                let _ = create_table(&client, "books", "book_id", "branch_id", "title").await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires DynamoDB Local on BOOKHIVE_DDB_ENDPOINT"]
    async fn test_should_create_query_books() {
        let repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books", "books_ndx");
        let branch = Uuid::new_v4().to_string();
        for i in 0..30 {
            let mut book = BookEntity::new(branch.as_str(), format!("Title {:02}", i).as_str(), "Author", 1, 100);
            if i % 3 == 0 {
                book.available_copies = 0;
                book.refresh();
            }
            repo.create(&book).await.expect("should create book");
        }
        let mut total = 0;
        let mut next_page: Option<String> = None;
        for _i in 0..10 {
            let res = repo.find_by_status(branch.as_str(), BookStatus::Available, next_page.as_deref(), 5)
                .await.expect("should query books");
            total += res.records.len();
            next_page = res.next_page;
            if next_page.is_none() {
                break;
            }
        }
        assert_eq!(20, total);
        assert_eq!(30, repo.find_all(branch.as_str()).await.expect("should query").len());
        let res = repo.search(branch.as_str(), "TITLE 1").await.expect("should search");
        assert_eq!(10, res.len());
    }
}
