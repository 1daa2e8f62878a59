use async_trait::async_trait;
use tracing::info;
use crate::books::repository::BookRepository;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;
use crate::suppliers::domain::model::SupplierEntity;
use crate::suppliers::domain::SupplierService;
use crate::suppliers::dto::SupplierDto;
use crate::suppliers::repository::SupplierRepository;

const SEARCH_FIELDS: [&str; 3] = ["name", "contact", "location"];

pub(crate) struct SupplierServiceImpl {
    branch_id: String,
    supplier_repository: Box<dyn SupplierRepository>,
    book_repository: Box<dyn BookRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl SupplierServiceImpl {
    pub(crate) fn new(config: &Configuration, supplier_repository: Box<dyn SupplierRepository>,
                      book_repository: Box<dyn BookRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            supplier_repository,
            book_repository,
            events_publisher,
        }
    }

    fn validate(supplier: &SupplierEntity) -> LibraryResult<()> {
        if supplier.supplier_name.is_empty() {
            return Err(LibraryError::validation("supplier name is required", Some("400".to_string())));
        }
        Ok(())
    }
}

#[async_trait]
impl SupplierService for SupplierServiceImpl {
    async fn add_supplier(&self, supplier: &SupplierDto) -> LibraryResult<SupplierDto> {
        let mut entity = SupplierEntity::from_dto(self.branch_id.as_str(), supplier);
        entity.version = 0;
        Self::validate(&entity)?;
        self.supplier_repository.create(&entity).await?;
        let dto = SupplierDto::from(&entity);
        info!("added supplier {}", dto.supplier_name);
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "supplier_added", "suppliers", dto.supplier_id.as_str(), &dto)?).await?;
        Ok(dto)
    }

    async fn update_supplier(&self, supplier: &SupplierDto) -> LibraryResult<SupplierDto> {
        let existing = self.supplier_repository.get(supplier.supplier_id.as_str()).await?;
        let mut entity = SupplierEntity::from_dto(self.branch_id.as_str(), supplier);
        entity.version = existing.version;
        entity.created_at = existing.created_at;
        Self::validate(&entity)?;
        self.supplier_repository.update(&entity).await?;
        let updated = SupplierDto::from(&self.supplier_repository.get(entity.supplier_id.as_str()).await?);
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "supplier_updated", "suppliers", updated.supplier_id.as_str(), &updated)?).await?;
        Ok(updated)
    }

    async fn remove_supplier(&self, id: &str) -> LibraryResult<()> {
        let _ = self.supplier_repository.get(id).await?;
        let books = self.book_repository.find_by_supplier(self.branch_id.as_str(), id).await?;
        if !books.is_empty() {
            return Err(LibraryError::validation(
                format!("supplier {} is still referenced by {} books", id, books.len()).as_str(), Some("400".to_string())));
        }
        self.supplier_repository.delete(id).await?;
        info!("removed supplier {}", id);
        let _ = self.events_publisher.publish(&DomainEvent::deleted(
            "supplier_removed", "suppliers", id, &id.to_string())?).await?;
        Ok(())
    }

    async fn find_supplier_by_id(&self, id: &str) -> LibraryResult<SupplierDto> {
        self.supplier_repository.get(id).await.map(|s| SupplierDto::from(&s))
    }

    async fn search_suppliers(&self, field: Option<&str>, keyword: Option<&str>) -> LibraryResult<Vec<SupplierDto>> {
        let field = field.map(|f| f.trim().to_lowercase()).filter(|f| !f.is_empty());
        let keyword = keyword.map(|k| k.trim().to_lowercase()).unwrap_or_default();
        if let Some(field) = &field {
            if !SEARCH_FIELDS.contains(&field.as_str()) {
                return Err(LibraryError::validation(
                    format!("cannot search suppliers by {}", field).as_str(), Some("400".to_string())));
            }
        }
        let suppliers = self.supplier_repository.find_all(self.branch_id.as_str()).await?;
        let mut matched = vec![];
        for supplier in suppliers {
            let hit = match &field {
                Some(field) => supplier.field(field.as_str()).unwrap_or_default().to_lowercase().contains(keyword.as_str()),
                None => SEARCH_FIELDS.iter()
                    .any(|f| supplier.field(f).unwrap_or_default().to_lowercase().contains(keyword.as_str())),
            };
            if hit {
                matched.push(SupplierDto::from(&supplier));
            }
        }
        Ok(matched)
    }
}
