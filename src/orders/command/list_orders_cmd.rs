use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::core::library::OrderStatus;
use crate::orders::domain::OrderService;
use crate::orders::dto::OrderDto;

pub(crate) struct ListOrdersCommand {
    order_service: Box<dyn OrderService>,
}

impl ListOrdersCommand {
    pub(crate) fn new(order_service: Box<dyn OrderService>) -> Self {
        Self {
            order_service,
        }
    }
}

// with a student the student's orders come back newest first, otherwise every order oldest first
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListOrdersCommandRequest {
    pub student_id: Option<String>,
    pub order_status: Option<OrderStatus>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListOrdersCommandResponse {
    pub orders: Vec<OrderDto>,
}

#[async_trait]
impl Command<ListOrdersCommandRequest, ListOrdersCommandResponse> for ListOrdersCommand {
    async fn execute(&self, req: ListOrdersCommandRequest) -> Result<ListOrdersCommandResponse, CommandError> {
        let orders = match req.student_id {
            Some(student_id) => self.order_service.list_student_orders(student_id.as_str()).await,
            None => self.order_service.list_orders(req.order_status).await,
        };
        orders.map_err(CommandError::from).map(|orders| ListOrdersCommandResponse { orders })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::library::OrderStatus;
    use crate::core::repository::RepositoryStore;
    use crate::orders::command::list_orders_cmd::{ListOrdersCommand, ListOrdersCommandRequest};
    use crate::orders::factory;

    #[tokio::test]
    async fn test_should_run_list_orders() {
        let config = Configuration::new(Uuid::new_v4().to_string().as_str());
        let cmd = ListOrdersCommand::new(factory::create_order_service(&config, RepositoryStore::InMemory).await);
        let res = cmd.execute(ListOrdersCommandRequest { student_id: None, order_status: Some(OrderStatus::Pending) })
            .await.expect("should list");
        assert!(res.orders.is_empty());
        let res = cmd.execute(ListOrdersCommandRequest { student_id: Some(Uuid::new_v4().to_string()), order_status: None })
            .await.expect("should list");
        assert!(res.orders.is_empty());
    }
}
