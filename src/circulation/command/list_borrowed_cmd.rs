use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::BorrowDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct ListBorrowedCommand {
    circulation_service: Box<dyn CirculationService>,
}

impl ListBorrowedCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListBorrowedCommandRequest {
    pub student_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListBorrowedCommandResponse {
    pub borrows: Vec<BorrowDto>,
}

#[async_trait]
impl Command<ListBorrowedCommandRequest, ListBorrowedCommandResponse> for ListBorrowedCommand {
    async fn execute(&self, req: ListBorrowedCommandRequest) -> Result<ListBorrowedCommandResponse, CommandError> {
        self.circulation_service.list_borrowed(req.student_id.as_deref())
            .await.map_err(CommandError::from).map(|borrows| ListBorrowedCommandResponse { borrows })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::circulation::command::list_borrowed_cmd::{ListBorrowedCommand, ListBorrowedCommandRequest};
    use crate::circulation::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_list_borrowed() {
        let svc = factory::create_circulation_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
        let res = ListBorrowedCommand::new(svc)
            .execute(ListBorrowedCommandRequest { student_id: Some(Uuid::new_v4().to_string()) })
            .await.expect("should list");
        assert!(res.borrows.is_empty());
    }
}
