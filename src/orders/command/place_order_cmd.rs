use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::orders::domain::OrderService;
use crate::orders::dto::OrderDto;

pub(crate) struct PlaceOrderCommand {
    order_service: Box<dyn OrderService>,
}

impl PlaceOrderCommand {
    pub(crate) fn new(order_service: Box<dyn OrderService>) -> Self {
        Self {
            order_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaceOrderCommandRequest {
    #[serde(default)]
    pub student_id: String,
    pub book_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PlaceOrderCommandResponse {
    pub order: OrderDto,
}

#[async_trait]
impl Command<PlaceOrderCommandRequest, PlaceOrderCommandResponse> for PlaceOrderCommand {
    async fn execute(&self, req: PlaceOrderCommandRequest) -> Result<PlaceOrderCommandResponse, CommandError> {
        self.order_service.place_order(req.student_id.as_str(), &req.book_ids)
            .await.map_err(CommandError::from).map(|order| PlaceOrderCommandResponse { order })
    }
}
