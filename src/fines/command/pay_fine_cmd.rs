use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::fines::domain::FineService;
use crate::fines::dto::FineDto;

pub(crate) struct PayFineCommand {
    fine_service: Box<dyn FineService>,
}

impl PayFineCommand {
    pub(crate) fn new(fine_service: Box<dyn FineService>) -> Self {
        Self {
            fine_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PayFineCommandRequest {
    pub student_id: String,
    pub fine_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct PayFineCommandResponse {
    pub fine: FineDto,
}

#[async_trait]
impl Command<PayFineCommandRequest, PayFineCommandResponse> for PayFineCommand {
    async fn execute(&self, req: PayFineCommandRequest) -> Result<PayFineCommandResponse, CommandError> {
        self.fine_service.pay(req.student_id.as_str(), req.fine_id.as_str())
            .await.map_err(CommandError::from).map(|fine| PayFineCommandResponse { fine })
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::library::PaymentStatus;
    use crate::core::repository::RepositoryStore;
    use crate::fines::command::pay_fine_cmd::{PayFineCommand, PayFineCommandRequest};
    use crate::fines::factory;

    #[tokio::test]
    async fn test_should_run_pay_fine() {
        let svc = factory::create_fine_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
        let student = Uuid::new_v4().to_string();
        let fine = svc.assess_fine(student.as_str(), "borrow", 4000, "Overdue by 4 days").await.expect("should assess");
        let cmd = PayFineCommand::new(svc);
        let res = cmd.execute(PayFineCommandRequest { student_id: student.to_string(), fine_id: fine.fine_id.to_string() })
            .await.expect("should pay fine");
        assert_eq!(PaymentStatus::Paid, res.fine.payment_status);
        let res = cmd.execute(PayFineCommandRequest { student_id: "other".to_string(), fine_id: fine.fine_id.to_string() }).await;
        assert!(matches!(res, Err(CommandError::Access { .. })));
    }
}
