use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::accounts::domain::AccountService;
use crate::accounts::dto::MemberDto;
use crate::core::command::{Command, CommandError};
use crate::core::library::Role;

pub(crate) struct RegisterMemberCommand {
    account_service: Box<dyn AccountService>,
    role: Role,
}

impl RegisterMemberCommand {
    pub(crate) fn new(account_service: Box<dyn AccountService>, role: Role) -> Self {
        Self {
            account_service,
            role,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterMemberCommandRequest {
    #[serde(alias = "student_number", alias = "librarian_number")]
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterMemberCommandRequest {
    pub fn new(username: &str, full_name: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterMemberCommandResponse {
    pub member: MemberDto,
}

impl RegisterMemberCommandResponse {
    pub fn new(member: MemberDto) -> Self {
        Self {
            member,
        }
    }
}

#[async_trait]
impl Command<RegisterMemberCommandRequest, RegisterMemberCommandResponse> for RegisterMemberCommand {
    async fn execute(&self, req: RegisterMemberCommandRequest) -> Result<RegisterMemberCommandResponse, CommandError> {
        let res = match self.role {
            Role::Student => self.account_service.register_student(
                req.username.as_str(), req.full_name.as_str(), req.email.as_str(), req.password.as_str()).await,
            Role::Librarian => self.account_service.register_librarian(
                req.username.as_str(), req.full_name.as_str(), req.email.as_str(), req.password.as_str()).await,
        };
        res.map_err(CommandError::from).map(RegisterMemberCommandResponse::new)
    }
}
