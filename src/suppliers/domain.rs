pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::library::LibraryResult;
use crate::suppliers::dto::SupplierDto;

#[async_trait]
pub(crate) trait SupplierService: Sync + Send {
    async fn add_supplier(&self, supplier: &SupplierDto) -> LibraryResult<SupplierDto>;
    async fn update_supplier(&self, supplier: &SupplierDto) -> LibraryResult<SupplierDto>;
    async fn remove_supplier(&self, id: &str) -> LibraryResult<()>;
    async fn find_supplier_by_id(&self, id: &str) -> LibraryResult<SupplierDto>;
    // field is one of name, contact or location; without a keyword every supplier is listed
    async fn search_suppliers(&self, field: Option<&str>, keyword: Option<&str>) -> LibraryResult<Vec<SupplierDto>>;
}
