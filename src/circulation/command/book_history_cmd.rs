use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::BorrowDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct BookHistoryCommand {
    circulation_service: Box<dyn CirculationService>,
}

impl BookHistoryCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BookHistoryCommandRequest {
    pub book_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct BookHistoryCommandResponse {
    pub borrows: Vec<BorrowDto>,
}

#[async_trait]
impl Command<BookHistoryCommandRequest, BookHistoryCommandResponse> for BookHistoryCommand {
    async fn execute(&self, req: BookHistoryCommandRequest) -> Result<BookHistoryCommandResponse, CommandError> {
        self.circulation_service.book_history(req.book_id.as_str())
            .await.map_err(CommandError::from).map(|borrows| BookHistoryCommandResponse { borrows })
    }
}

#[cfg(test)]
mod tests {
    use crate::circulation::command::book_history_cmd::{BookHistoryCommand, BookHistoryCommandRequest};
    use crate::circulation::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_book_history_of_unknown_book() {
        let svc = factory::create_circulation_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
        let res = BookHistoryCommand::new(svc)
            .execute(BookHistoryCommandRequest { book_id: "never-borrowed".to_string() })
            .await.expect("should list history");
        assert!(res.borrows.is_empty());
    }
}
