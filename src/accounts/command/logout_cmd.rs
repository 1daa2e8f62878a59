use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::accounts::domain::AccountService;
use crate::core::command::{Command, CommandError};

pub(crate) struct LogoutCommand {
    account_service: Box<dyn AccountService>,
}

impl LogoutCommand {
    pub(crate) fn new(account_service: Box<dyn AccountService>) -> Self {
        Self {
            account_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LogoutCommandRequest {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LogoutCommandResponse {
    pub session_id: String,
}

#[async_trait]
impl Command<LogoutCommandRequest, LogoutCommandResponse> for LogoutCommand {
    async fn execute(&self, req: LogoutCommandRequest) -> Result<LogoutCommandResponse, CommandError> {
        self.account_service.logout(req.session_id.as_str())
            .await.map_err(CommandError::from).map(|_| LogoutCommandResponse { session_id: req.session_id.to_string() })
    }
}
