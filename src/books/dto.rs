use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;
use crate::core::library::BookStatus;
use crate::utils::date::serializer;

// BookDto is a data transfer object for Catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BookDto {
    pub book_id: String,
    pub version: i64,
    pub branch_id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub shelf_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    pub price_cents: i64,
    pub total_copies: i64,
    pub available_copies: i64,
    pub book_status: BookStatus,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl Identifiable for BookDto {
    fn id(&self) -> String {
        self.book_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Book for BookDto {
    fn title(&self) -> String {
        self.title.to_string()
    }

    fn price_cents(&self) -> i64 {
        self.price_cents
    }

    fn available_copies(&self) -> i64 {
        self.available_copies
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            book_id: other.book_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            genre: other.genre.to_string(),
            shelf_location: other.shelf_location.to_string(),
            supplier_id: other.supplier_id.clone(),
            price_cents: other.price_cents,
            total_copies: other.total_copies,
            available_copies: other.available_copies,
            book_status: other.book_status,
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        let mut book = Self {
            book_id: other.book_id.to_string(),
            version: other.version,
            branch_id: other.branch_id.to_string(),
            title: other.title.trim().to_string(),
            author: other.author.trim().to_string(),
            genre: other.genre.trim().to_string(),
            shelf_location: other.shelf_location.trim().to_string(),
            supplier_id: other.supplier_id.clone().filter(|s| !s.trim().is_empty()),
            price_cents: other.price_cents,
            total_copies: other.total_copies,
            available_copies: other.available_copies,
            book_status: other.book_status,
            search_text: "".to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        };
        book.refresh();
        book
    }
}
