use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::core::library::{OrderStatus, PaymentStatus};
use crate::orders::domain::OrderService;
use crate::orders::dto::OrderDto;

pub(crate) struct UpdateOrdersCommand {
    order_service: Box<dyn OrderService>,
}

impl UpdateOrdersCommand {
    pub(crate) fn new(order_service: Box<dyn OrderService>) -> Self {
        Self {
            order_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateOrdersCommandRequest {
    pub order_ids: Vec<String>,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateOrdersCommandResponse {
    pub orders: Vec<OrderDto>,
    pub total_cents: i64,
}

#[async_trait]
impl Command<UpdateOrdersCommandRequest, UpdateOrdersCommandResponse> for UpdateOrdersCommand {
    async fn execute(&self, req: UpdateOrdersCommandRequest) -> Result<UpdateOrdersCommandResponse, CommandError> {
        let orders = self.order_service.update_orders(&req.order_ids, req.order_status, req.payment_status)
            .await.map_err(CommandError::from)?;
        let total_cents = orders.iter().map(|o| o.total_cents).sum();
        Ok(UpdateOrdersCommandResponse { orders, total_cents })
    }
}
