pub mod service;

use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::core::library::{LibraryResult, PaginatedResult};

#[async_trait]
pub(crate) trait CatalogService: Sync + Send {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn remove_book(&self, id: &str) -> LibraryResult<()>;
    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto>;
    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto>;
    async fn list_available(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookDto>>;
    // keyword searches title, author and genre unless field names one of
    // title, author, genre or shelf_location
    async fn search_books(&self, keyword: Option<&str>, field: Option<&str>, available_only: bool) -> LibraryResult<Vec<BookDto>>;
    // takes one copy off the shelf
    async fn check_out_copy(&self, id: &str) -> LibraryResult<BookDto>;
    // puts one copy back on the shelf
    async fn check_in_copy(&self, id: &str) -> LibraryResult<BookDto>;
    // removes a lent copy for good; None when it was the last copy and the book left the catalog
    async fn write_off_copy(&self, id: &str) -> LibraryResult<Option<BookDto>>;
}
