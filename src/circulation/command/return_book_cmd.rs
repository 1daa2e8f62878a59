use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::BorrowDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct ReturnBookCommand {
    circulation_service: Box<dyn CirculationService>,
}

impl ReturnBookCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReturnBookCommandRequest {
    pub borrow_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReturnBookCommandResponse {
    pub borrow: BorrowDto,
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        self.circulation_service.return_book(req.borrow_id.as_str())
            .await.map_err(CommandError::from).map(|borrow| ReturnBookCommandResponse { borrow })
    }
}
