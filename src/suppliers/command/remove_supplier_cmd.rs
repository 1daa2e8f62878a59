use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::suppliers::domain::SupplierService;

pub(crate) struct RemoveSupplierCommand {
    supplier_service: Box<dyn SupplierService>,
}

impl RemoveSupplierCommand {
    pub(crate) fn new(supplier_service: Box<dyn SupplierService>) -> Self {
        Self {
            supplier_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveSupplierCommandRequest {
    pub supplier_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveSupplierCommandResponse {
    pub supplier_id: String,
}

#[async_trait]
impl Command<RemoveSupplierCommandRequest, RemoveSupplierCommandResponse> for RemoveSupplierCommand {
    async fn execute(&self, req: RemoveSupplierCommandRequest) -> Result<RemoveSupplierCommandResponse, CommandError> {
        self.supplier_service.remove_supplier(req.supplier_id.as_str())
            .await.map_err(CommandError::from).map(|_| RemoveSupplierCommandResponse { supplier_id: req.supplier_id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::suppliers::command::remove_supplier_cmd::{RemoveSupplierCommand, RemoveSupplierCommandRequest};
    use crate::suppliers::factory;

    lazy_static! {
        static ref SUT_CMD : AsyncOnce<RemoveSupplierCommand> = AsyncOnce::new(async {
                let svc = factory::create_supplier_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                RemoveSupplierCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_remove_missing_supplier() {
        let cmd = SUT_CMD.get().await;
        let res = cmd.execute(RemoveSupplierCommandRequest { supplier_id: "missing".to_string() }).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
