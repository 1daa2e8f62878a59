use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::suppliers::domain::SupplierService;
use crate::suppliers::dto::SupplierDto;

pub(crate) struct GetSupplierCommand {
    supplier_service: Box<dyn SupplierService>,
}

impl GetSupplierCommand {
    pub(crate) fn new(supplier_service: Box<dyn SupplierService>) -> Self {
        Self {
            supplier_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetSupplierCommandRequest {
    pub supplier_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetSupplierCommandResponse {
    pub supplier: SupplierDto,
}

#[async_trait]
impl Command<GetSupplierCommandRequest, GetSupplierCommandResponse> for GetSupplierCommand {
    async fn execute(&self, req: GetSupplierCommandRequest) -> Result<GetSupplierCommandResponse, CommandError> {
        self.supplier_service.find_supplier_by_id(req.supplier_id.as_str())
            .await.map_err(CommandError::from).map(|supplier| GetSupplierCommandResponse { supplier })
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::suppliers::command::get_supplier_cmd::{GetSupplierCommand, GetSupplierCommandRequest};
    use crate::suppliers::domain::SupplierService;
    use crate::suppliers::dto::SupplierDto;
    use crate::suppliers::factory;

    lazy_static! {
        static ref SUPPLIER_SVC: AsyncOnce<Box<dyn SupplierService>> = AsyncOnce::new(async {
                factory::create_supplier_service(&Configuration::new("test"), RepositoryStore::InMemory).await
            });
        static ref SUT_CMD : AsyncOnce<GetSupplierCommand> = AsyncOnce::new(async {
                let svc = factory::create_supplier_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                GetSupplierCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_get_supplier() {
        let supplier = SUPPLIER_SVC.get().await.add_supplier(&SupplierDto::new("Acme", None, None))
            .await.expect("should add supplier");
        let res = SUT_CMD.get().await.execute(GetSupplierCommandRequest { supplier_id: supplier.supplier_id.to_string() })
            .await.expect("should get supplier");
        assert_eq!(supplier, res.supplier);
    }
}
