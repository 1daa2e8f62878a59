use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::fines::domain::FineService;
use crate::fines::dto::FineDto;

pub(crate) struct ListFinesCommand {
    fine_service: Box<dyn FineService>,
}

impl ListFinesCommand {
    pub(crate) fn new(fine_service: Box<dyn FineService>) -> Self {
        Self {
            fine_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListFinesCommandRequest {
    pub student_id: String,
    #[serde(default)]
    pub unpaid_only: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListFinesCommandResponse {
    pub fines: Vec<FineDto>,
    pub outstanding_cents: i64,
}

#[async_trait]
impl Command<ListFinesCommandRequest, ListFinesCommandResponse> for ListFinesCommand {
    async fn execute(&self, req: ListFinesCommandRequest) -> Result<ListFinesCommandResponse, CommandError> {
        let fines = if req.unpaid_only {
            self.fine_service.list_unpaid(req.student_id.as_str()).await
        } else {
            self.fine_service.list_fines(req.student_id.as_str()).await
        }.map_err(CommandError::from)?;
        let outstanding_cents = self.fine_service.outstanding_balance(req.student_id.as_str())
            .await.map_err(CommandError::from)?;
        Ok(ListFinesCommandResponse { fines, outstanding_cents })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::fines::command::list_fines_cmd::{ListFinesCommand, ListFinesCommandRequest};
    use crate::fines::factory;

    #[tokio::test]
    async fn test_should_run_list_fines() {
        let svc = factory::create_fine_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
        let student = Uuid::new_v4().to_string();
        let fine = svc.assess_fine(student.as_str(), "borrow-1", 2000, "Overdue by 2 days").await.expect("should assess");
        svc.assess_fine(student.as_str(), "borrow-2", 500, "Book lost - charged full price").await.expect("should assess");
        svc.pay(student.as_str(), fine.fine_id.as_str()).await.expect("should pay");
        let cmd = ListFinesCommand::new(svc);
        let res = cmd.execute(ListFinesCommandRequest { student_id: student.to_string(), unpaid_only: false })
            .await.expect("should list fines");
        assert_eq!(2, res.fines.len());
        assert_eq!(500, res.outstanding_cents);
        let res = cmd.execute(ListFinesCommandRequest { student_id: student.to_string(), unpaid_only: true })
            .await.expect("should list fines");
        assert_eq!(1, res.fines.len());
    }
}
