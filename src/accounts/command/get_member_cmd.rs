use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::accounts::domain::AccountService;
use crate::accounts::dto::MemberDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetMemberCommand {
    account_service: Box<dyn AccountService>,
}

impl GetMemberCommand {
    pub(crate) fn new(account_service: Box<dyn AccountService>) -> Self {
        Self {
            account_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetMemberCommandRequest {
    pub member_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetMemberCommandResponse {
    pub member: MemberDto,
}

#[async_trait]
impl Command<GetMemberCommandRequest, GetMemberCommandResponse> for GetMemberCommand {
    async fn execute(&self, req: GetMemberCommandRequest) -> Result<GetMemberCommandResponse, CommandError> {
        self.account_service.find_member_by_id(req.member_id.as_str())
            .await.map_err(CommandError::from).map(|member| GetMemberCommandResponse { member })
    }
}
