use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::suppliers::domain::SupplierService;
use crate::suppliers::dto::SupplierDto;

pub(crate) struct AddSupplierCommand {
    supplier_service: Box<dyn SupplierService>,
}

impl AddSupplierCommand {
    pub(crate) fn new(supplier_service: Box<dyn SupplierService>) -> Self {
        Self {
            supplier_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddSupplierCommandRequest {
    #[serde(alias = "name")]
    pub supplier_name: String,
    pub contact: Option<String>,
    pub location: Option<String>,
}

impl AddSupplierCommandRequest {
    pub fn new(supplier_name: &str) -> Self {
        Self {
            supplier_name: supplier_name.to_string(),
            contact: None,
            location: None,
        }
    }

    pub fn build_supplier(&self) -> SupplierDto {
        SupplierDto::new(self.supplier_name.as_str(), self.contact.clone(), self.location.clone())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddSupplierCommandResponse {
    pub supplier: SupplierDto,
}

#[async_trait]
impl Command<AddSupplierCommandRequest, AddSupplierCommandResponse> for AddSupplierCommand {
    async fn execute(&self, req: AddSupplierCommandRequest) -> Result<AddSupplierCommandResponse, CommandError> {
        self.supplier_service.add_supplier(&req.build_supplier())
            .await.map_err(CommandError::from).map(|supplier| AddSupplierCommandResponse { supplier })
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::suppliers::command::add_supplier_cmd::{AddSupplierCommand, AddSupplierCommandRequest};
    use crate::suppliers::factory;

    lazy_static! {
        static ref SUT_CMD : AsyncOnce<AddSupplierCommand> = AsyncOnce::new(async {
                let svc = factory::create_supplier_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddSupplierCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_add_supplier() {
        let cmd = SUT_CMD.get().await;
        let res = cmd.execute(AddSupplierCommandRequest::new("Acme")).await.expect("should add supplier");
        assert_eq!("Acme", res.supplier.supplier_name.as_str());
    }
}
