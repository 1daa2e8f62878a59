use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct UpdateBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl UpdateBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateBookCommandRequest {
    #[serde(default)]
    pub book_id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub shelf_location: String,
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub price_cents: i64,
    #[serde(alias = "quantity")]
    pub total_copies: i64,
}

impl UpdateBookCommandRequest {
    pub fn new(book: &BookDto) -> Self {
        Self {
            book_id: book.book_id.to_string(),
            title: book.title.to_string(),
            author: book.author.to_string(),
            genre: book.genre.to_string(),
            shelf_location: book.shelf_location.to_string(),
            supplier_id: book.supplier_id.clone(),
            price_cents: book.price_cents,
            total_copies: book.total_copies,
        }
    }

    // version and available copies are taken from the stored book
    pub fn build_book(&self) -> BookDto {
        let mut book = BookEntity::new("", self.title.as_str(), self.author.as_str(), self.total_copies, self.price_cents);
        book.book_id = self.book_id.to_string();
        book.genre = self.genre.to_string();
        book.shelf_location = self.shelf_location.to_string();
        book.supplier_id = self.supplier_id.clone();
        BookDto::from(&book)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateBookCommandResponse {
    pub book: BookDto,
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        self.catalog_service.update_book(&req.build_book())
            .await.map_err(CommandError::from).map(|book| UpdateBookCommandResponse { book })
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref ADD_CMD : AsyncOnce<AddBookCommand> = AsyncOnce::new(async {
                let svc = factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddBookCommand::new(svc)
            });
        static ref UPDATE_CMD : AsyncOnce<UpdateBookCommand> = AsyncOnce::new(async {
                let svc = factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                UpdateBookCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_update_book() {
        let add_cmd = ADD_CMD.get().await;
        let update_cmd = UPDATE_CMD.get().await;
        let title = format!("Book {}", Uuid::new_v4());
        let added = add_cmd.execute(AddBookCommandRequest::new(title.as_str(), "Jules Verne", 2))
            .await.expect("should add book");

        let mut req = UpdateBookCommandRequest::new(&added.book);
        req.shelf_location = "C-3".to_string();
        req.total_copies = 5;
        let res = update_cmd.execute(req).await.expect("should update book");
        assert_eq!("C-3", res.book.shelf_location.as_str());
        assert_eq!(5, res.book.available_copies);
        assert_eq!(added.book.version + 1, res.book.version);

        let mut req = UpdateBookCommandRequest::new(&res.book);
        req.book_id = "missing".to_string();
        let res = update_cmd.execute(req).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
