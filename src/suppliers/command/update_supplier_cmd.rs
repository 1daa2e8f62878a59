use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::suppliers::domain::SupplierService;
use crate::suppliers::dto::SupplierDto;

pub(crate) struct UpdateSupplierCommand {
    supplier_service: Box<dyn SupplierService>,
}

impl UpdateSupplierCommand {
    pub(crate) fn new(supplier_service: Box<dyn SupplierService>) -> Self {
        Self {
            supplier_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateSupplierCommandRequest {
    #[serde(default)]
    pub supplier_id: String,
    #[serde(alias = "name")]
    pub supplier_name: String,
    pub contact: Option<String>,
    pub location: Option<String>,
}

impl UpdateSupplierCommandRequest {
    pub fn build_supplier(&self) -> SupplierDto {
        let mut supplier = SupplierDto::new(self.supplier_name.as_str(), self.contact.clone(), self.location.clone());
        supplier.supplier_id = self.supplier_id.to_string();
        supplier
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateSupplierCommandResponse {
    pub supplier: SupplierDto,
}

#[async_trait]
impl Command<UpdateSupplierCommandRequest, UpdateSupplierCommandResponse> for UpdateSupplierCommand {
    async fn execute(&self, req: UpdateSupplierCommandRequest) -> Result<UpdateSupplierCommandResponse, CommandError> {
        self.supplier_service.update_supplier(&req.build_supplier())
            .await.map_err(CommandError::from).map(|supplier| UpdateSupplierCommandResponse { supplier })
    }
}
