use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::CirculationService;
use crate::circulation::dto::BorrowDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct BorrowBookCommand {
    circulation_service: Box<dyn CirculationService>,
}

impl BorrowBookCommand {
    pub(crate) fn new(circulation_service: Box<dyn CirculationService>) -> Self {
        Self {
            circulation_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BorrowBookCommandRequest {
    // taken from the session
    #[serde(default)]
    pub student_id: String,
    pub book_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct BorrowBookCommandResponse {
    pub borrow: BorrowDto,
}

#[async_trait]
impl Command<BorrowBookCommandRequest, BorrowBookCommandResponse> for BorrowBookCommand {
    async fn execute(&self, req: BorrowBookCommandRequest) -> Result<BorrowBookCommandResponse, CommandError> {
        self.circulation_service.borrow(req.student_id.as_str(), req.book_id.as_str())
            .await.map_err(CommandError::from).map(|borrow| BorrowBookCommandResponse { borrow })
    }
}
