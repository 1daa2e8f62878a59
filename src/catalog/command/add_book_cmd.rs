use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Box<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Box<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddBookCommandRequest {
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

impl AddBookCommandRequest {
    pub fn new(title: &str, author: &str, total_copies: i64) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            genre: "".to_string(),
            shelf_location: "".to_string(),
            supplier_id: None,
            price_cents: 0,
            total_copies,
        }
    }

    // branch and copies on the shelf are assigned by the catalog
    pub fn build_book(&self) -> BookDto {
        let mut book = BookEntity::new("", self.title.as_str(), self.author.as_str(), self.total_copies, self.price_cents);
        book.genre = self.genre.to_string();
        book.shelf_location = self.shelf_location.to_string();
        book.supplier_id = self.supplier_id.clone();
        BookDto::from(&book)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddBookCommandResponse {
    pub book: BookDto,
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        self.catalog_service.add_book(&req.build_book())
            .await.map_err(CommandError::from).map(|book| AddBookCommandResponse { book })
    }
}
