use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::suppliers::domain::SupplierService;
use crate::suppliers::dto::SupplierDto;

pub(crate) struct SearchSuppliersCommand {
    supplier_service: Box<dyn SupplierService>,
}

impl SearchSuppliersCommand {
    pub(crate) fn new(supplier_service: Box<dyn SupplierService>) -> Self {
        Self {
            supplier_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchSuppliersCommandRequest {
    pub field: Option<String>,
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchSuppliersCommandResponse {
    pub suppliers: Vec<SupplierDto>,
}

#[async_trait]
impl Command<SearchSuppliersCommandRequest, SearchSuppliersCommandResponse> for SearchSuppliersCommand {
    async fn execute(&self, req: SearchSuppliersCommandRequest) -> Result<SearchSuppliersCommandResponse, CommandError> {
        self.supplier_service.search_suppliers(req.field.as_deref(), req.keyword.as_deref())
            .await.map_err(CommandError::from).map(|suppliers| SearchSuppliersCommandResponse { suppliers })
    }
}
