use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::orders::domain::OrderService;
use crate::orders::dto::OrderDto;

pub(crate) struct RequestBookCommand {
    order_service: Box<dyn OrderService>,
}

impl RequestBookCommand {
    pub(crate) fn new(order_service: Box<dyn OrderService>) -> Self {
        Self {
            order_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RequestBookCommandRequest {
    #[serde(default)]
    pub student_id: String,
    pub title: String,
    pub author: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestBookCommandResponse {
    pub order: OrderDto,
}

#[async_trait]
impl Command<RequestBookCommandRequest, RequestBookCommandResponse> for RequestBookCommand {
    async fn execute(&self, req: RequestBookCommandRequest) -> Result<RequestBookCommandResponse, CommandError> {
        self.order_service.request_book(req.student_id.as_str(), req.title.as_str(), req.author.as_str())
            .await.map_err(CommandError::from).map(|order| RequestBookCommandResponse { order })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::accounts::factory::create_account_service;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::orders::command::request_book_cmd::{RequestBookCommand, RequestBookCommandRequest};
    use crate::orders::factory;

    #[tokio::test]
    async fn test_should_run_request_book() {
        let config = Configuration::new("test");
        let number = format!("S-{}", Uuid::new_v4());
        let student = create_account_service(&config, RepositoryStore::InMemory).await
            .register_student(number.as_str(), "Ada", format!("{}@uni.edu", number).as_str(), "pw")
            .await.expect("should register");
        let cmd = RequestBookCommand::new(factory::create_order_service(&config, RepositoryStore::InMemory).await);
        let req = RequestBookCommandRequest {
            student_id: student.member_id.to_string(),
            title: "Snow Crash".to_string(),
            author: "Neal Stephenson".to_string(),
        };
        let res = cmd.execute(req).await.expect("should request book");
        assert_eq!(student.member_id, res.order.student_id);
        assert_eq!(0, res.order.total_cents);
    }
}
