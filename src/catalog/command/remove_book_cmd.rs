use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct RemoveBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl RemoveBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveBookCommandRequest {
    pub book_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveBookCommandResponse {
    pub book_id: String,
}

#[async_trait]
impl Command<RemoveBookCommandRequest, RemoveBookCommandResponse> for RemoveBookCommand {
    async fn execute(&self, req: RemoveBookCommandRequest) -> Result<RemoveBookCommandResponse, CommandError> {
        self.catalog_service.remove_book(req.book_id.as_str())
            .await.map_err(CommandError::from).map(|_| RemoveBookCommandResponse { book_id: req.book_id })
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref ADD_CMD : AsyncOnce<AddBookCommand> = AsyncOnce::new(async {
                let svc = factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddBookCommand::new(svc)
            });
        static ref REMOVE_CMD : AsyncOnce<RemoveBookCommand> = AsyncOnce::new(async {
                let svc = factory::create_catalog_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                RemoveBookCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_remove_book() {
        let add_cmd = ADD_CMD.get().await;
        let remove_cmd = REMOVE_CMD.get().await;
        let title = format!("Book {}", Uuid::new_v4());
        let added = add_cmd.execute(AddBookCommandRequest::new(title.as_str(), "H. G. Wells", 1))
            .await.expect("should add book");
        let res = remove_cmd.execute(RemoveBookCommandRequest { book_id: added.book.book_id.to_string() })
            .await.expect("should remove book");
        assert_eq!(added.book.book_id, res.book_id);
        let res = remove_cmd.execute(RemoveBookCommandRequest { book_id: added.book.book_id.to_string() }).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
