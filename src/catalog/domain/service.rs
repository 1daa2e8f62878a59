use async_trait::async_trait;
use tracing::{info, warn};
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{BookStatus, LibraryError, LibraryResult, PaginatedResult};
use crate::gateway::events::EventPublisher;
use crate::suppliers::domain::SupplierService;

const SEARCH_FIELDS: [&str; 4] = ["title", "author", "genre", "shelf_location"];

// copy movements reload and retry when another request updated the book first
const MAX_COPY_ATTEMPTS: usize = 3;

pub(crate) struct CatalogServiceImpl {
    branch_id: String,
    book_repository: Box<dyn BookRepository>,
    supplier_service: Box<dyn SupplierService>,
    events_publisher: Box<dyn EventPublisher>,
}

enum CopyMovement {
    CheckOut,
    CheckIn,
    WriteOff,
}

impl CatalogServiceImpl {
    pub(crate) fn new(config: &Configuration, book_repository: Box<dyn BookRepository>,
                      supplier_service: Box<dyn SupplierService>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            book_repository,
            supplier_service,
            events_publisher,
        }
    }

    async fn validate(&self, book: &BookEntity) -> LibraryResult<()> {
        if book.title.is_empty() || book.author.is_empty() {
            return Err(LibraryError::validation("title and author are required", Some("400".to_string())));
        }
        if book.total_copies < 1 {
            return Err(LibraryError::validation("a book needs at least one copy", Some("400".to_string())));
        }
        if book.price_cents < 0 {
            return Err(LibraryError::validation("price cannot be negative", Some("400".to_string())));
        }
        if let Some(supplier_id) = &book.supplier_id {
            match self.supplier_service.find_supplier_by_id(supplier_id).await {
                Ok(_) => {}
                Err(LibraryError::NotFound { .. }) => {
                    return Err(LibraryError::validation(
                        format!("unknown supplier {}", supplier_id).as_str(), Some("400".to_string())));
                }
                Err(err) => return Err(err),
            }
        }
        let same = self.book_repository.find_by_title_author(self.branch_id.as_str(),
                                                             book.title.as_str(), book.author.as_str()).await?;
        if same.iter().any(|other| other.book_id != book.book_id) {
            return Err(LibraryError::duplicate_key(
                format!("{} by {} is already in the catalog", book.title, book.author).as_str()));
        }
        Ok(())
    }

    async fn move_copy(&self, id: &str, movement: CopyMovement) -> LibraryResult<Option<BookDto>> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let mut book = self.book_repository.get(id).await?;
            match movement {
                CopyMovement::CheckOut => {
                    if book.available_copies < 1 {
                        return Err(LibraryError::validation(
                            format!("no copy of {} is available", book.title).as_str(), Some("400".to_string())));
                    }
                    book.available_copies -= 1;
                }
                CopyMovement::CheckIn => {
                    book.available_copies = (book.available_copies + 1).min(book.total_copies);
                }
                CopyMovement::WriteOff => {
                    if book.total_copies <= 1 {
                        self.book_repository.delete(id).await?;
                        info!("wrote off the last copy of {}, removed from catalog", book.title);
                        let _ = self.events_publisher.publish(&DomainEvent::deleted(
                            "book_removed", "books", id, &BookDto::from(&book))?).await?;
                        return Ok(None);
                    }
                    book.total_copies -= 1;
                    book.available_copies = book.available_copies.min(book.total_copies);
                }
            }
            book.refresh();
            match self.book_repository.update(&book).await {
                Ok(_) => {
                    let updated = BookDto::from(&self.book_repository.get(id).await?);
                    let _ = self.events_publisher.publish(&DomainEvent::updated(
                        "book_copies_changed", "books", id, &updated)?).await?;
                    return Ok(Some(updated));
                }
                Err(err) if err.retryable() && attempt < MAX_COPY_ATTEMPTS => {
                    warn!("retrying copy update of {} after {}", id, err);
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        let mut entity = BookEntity::from(book);
        entity.version = 0;
        entity.branch_id = self.branch_id.to_string();
        entity.available_copies = entity.total_copies;
        entity.refresh();
        self.validate(&entity).await?;
        self.book_repository.create(&entity).await?;
        let dto = BookDto::from(&entity);
        info!("added {} copies of {}", dto.total_copies, dto.title);
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "book_added", "books", dto.book_id.as_str(), &dto)?).await?;
        Ok(dto)
    }

    async fn remove_book(&self, id: &str) -> LibraryResult<()> {
        let existing = self.book_repository.get(id).await?;
        if existing.copies_on_loan() > 0 {
            return Err(LibraryError::validation(
                format!("{} copies of {} are on loan", existing.copies_on_loan(), existing.title).as_str(),
                Some("400".to_string())));
        }
        self.book_repository.delete(id).await?;
        info!("removed {} from catalog", existing.title);
        let _ = self.events_publisher.publish(&DomainEvent::deleted(
            "book_removed", "books", id, &BookDto::from(&existing))?).await?;
        Ok(())
    }

    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        let existing = self.book_repository.get(book.book_id.as_str()).await?;
        let mut entity = BookEntity::from(book);
        entity.version = existing.version;
        entity.branch_id = existing.branch_id.to_string();
        entity.created_at = existing.created_at;
        entity.available_copies = existing.available_copies + (entity.total_copies - existing.total_copies);
        if entity.available_copies < 0 {
            return Err(LibraryError::validation(
                format!("{} copies of {} are on loan", existing.copies_on_loan(), existing.title).as_str(),
                Some("400".to_string())));
        }
        entity.refresh();
        self.validate(&entity).await?;
        self.book_repository.update(&entity).await?;
        let updated = BookDto::from(&self.book_repository.get(entity.book_id.as_str()).await?);
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "book_updated", "books", updated.book_id.as_str(), &updated)?).await?;
        Ok(updated)
    }

    async fn find_book_by_id(&self, id: &str) -> LibraryResult<BookDto> {
        self.book_repository.get(id).await.map(|b| BookDto::from(&b))
    }

    async fn list_available(&self, page: Option<&str>, page_size: usize) -> LibraryResult<PaginatedResult<BookDto>> {
        let res = self.book_repository.find_by_status(self.branch_id.as_str(), BookStatus::Available, page, page_size).await?;
        let records = res.records.iter().map(BookDto::from).collect();
        Ok(PaginatedResult::new(page, page_size, res.next_page, records))
    }

    async fn search_books(&self, keyword: Option<&str>, field: Option<&str>, available_only: bool) -> LibraryResult<Vec<BookDto>> {
        let keyword = keyword.map(|k| k.trim().to_lowercase()).unwrap_or_default();
        let field = field.map(|f| f.trim().to_lowercase()).filter(|f| !f.is_empty());
        let books = match &field {
            Some(field) => {
                if !SEARCH_FIELDS.contains(&field.as_str()) {
                    return Err(LibraryError::validation(
                        format!("cannot search books by {}", field).as_str(), Some("400".to_string())));
                }
                self.book_repository.find_all(self.branch_id.as_str()).await?
                    .into_iter()
                    .filter(|b| {
                        let value = match field.as_str() {
                            "title" => &b.title,
                            "author" => &b.author,
                            "genre" => &b.genre,
                            _ => &b.shelf_location,
                        };
                        value.to_lowercase().contains(keyword.as_str())
                    })
                    .collect()
            }
            None if keyword.is_empty() => self.book_repository.find_all(self.branch_id.as_str()).await?,
            None => self.book_repository.search(self.branch_id.as_str(), keyword.as_str()).await?,
        };
        Ok(books.iter()
            .filter(|b| !available_only || b.book_status == BookStatus::Available)
            .map(BookDto::from)
            .collect())
    }

    async fn check_out_copy(&self, id: &str) -> LibraryResult<BookDto> {
        self.move_copy(id, CopyMovement::CheckOut).await?
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn check_in_copy(&self, id: &str) -> LibraryResult<BookDto> {
        self.move_copy(id, CopyMovement::CheckIn).await?
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", id).as_str()))
    }

    async fn write_off_copy(&self, id: &str) -> LibraryResult<Option<BookDto>> {
        self.move_copy(id, CopyMovement::WriteOff).await
    }
}
