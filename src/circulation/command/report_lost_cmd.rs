use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::BorrowDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct ReportLostCommand {
    circulation_service: Box<dyn CirculationService>,
}

impl ReportLostCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReportLostCommandRequest {
    pub borrow_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReportLostCommandResponse {
    pub borrow: BorrowDto,
}

#[async_trait]
impl Command<ReportLostCommandRequest, ReportLostCommandResponse> for ReportLostCommand {
    async fn execute(&self, req: ReportLostCommandRequest) -> Result<ReportLostCommandResponse, CommandError> {
        self.circulation_service.report_lost(req.borrow_id.as_str())
            .await.map_err(CommandError::from).map(|borrow| ReportLostCommandResponse { borrow })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::accounts::factory::create_account_service;
    use crate::books::domain::model::BookEntity;
    use crate::books::dto::BookDto;
    use crate::catalog::factory::create_catalog_service;
    use crate::circulation::command::report_lost_cmd::{ReportLostCommand, ReportLostCommandRequest};
    use crate::circulation::factory;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::library::BorrowStatus;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_report_lost() {
        let config = Configuration::new("test");
        let number = format!("S-{}", Uuid::new_v4());
        let student = create_account_service(&config, RepositoryStore::InMemory).await
            .register_student(number.as_str(), "Ada", format!("{}@uni.edu", number).as_str(), "pw")
            .await.expect("should register");
        let book = create_catalog_service(&config, RepositoryStore::InMemory).await
            .add_book(&BookDto::from(&BookEntity::new("test", format!("Book {}", number).as_str(), "Author", 2, 4200)))
            .await.expect("should add book");
        let svc = factory::create_circulation_service(&config, RepositoryStore::InMemory).await;
        let borrow = svc.borrow(student.member_id.as_str(), book.book_id.as_str()).await.expect("should borrow");
        let res = ReportLostCommand::new(svc).execute(ReportLostCommandRequest { borrow_id: borrow.borrow_id.to_string() })
            .await.expect("should report lost");
        assert_eq!(BorrowStatus::Lost, res.borrow.borrow_status);
        assert_eq!(4200, res.borrow.fine_cents);
    }
}
