use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::BookStatus;
use crate::utils::date::serializer;

// BookEntity is a catalog title with a number of physical copies. Copies that are
// lent out are counted by total_copies - available_copies.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct BookEntity {
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
    // lower-cased "title author genre" for keyword search
    pub search_text: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BookEntity {
    pub fn new(branch_id: &str, title: &str, author: &str, total_copies: i64, price_cents: i64) -> Self {
        let mut book = Self {
            book_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            title: title.trim().to_string(),
            author: author.trim().to_string(),
            genre: "".to_string(),
            shelf_location: "".to_string(),
            supplier_id: None,
            price_cents,
            total_copies,
            available_copies: total_copies,
            book_status: BookStatus::Available,
            search_text: "".to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        };
        book.refresh();
        book
    }

    // refresh recomputes the derived attributes after copies or descriptive fields change
    pub fn refresh(&mut self) {
        self.book_status = BookStatus::from_copies(self.available_copies);
        self.search_text = format!("{} {} {}", self.title, self.author, self.genre).to_lowercase();
    }

    pub fn copies_on_loan(&self) -> i64 {
        self.total_copies - self.available_copies
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.book_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
