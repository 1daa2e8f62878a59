use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::accounts::domain::AccountService;
use crate::accounts::dto::SessionDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct LoginCommand {
    account_service: Box<dyn AccountService>,
}

impl LoginCommand {
    pub(crate) fn new(account_service: Box<dyn AccountService>) -> Self {
        Self {
            account_service,
        }
    }
}

// identifier is a student number, a librarian number or an email
#[derive(Debug, Deserialize)]
pub(crate) struct LoginCommandRequest {
    pub identifier: String,
    pub password: String,
}

impl LoginCommandRequest {
    pub fn new(identifier: &str, password: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            password: password.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginCommandResponse {
    pub session: SessionDto,
}

impl LoginCommandResponse {
    pub fn new(session: SessionDto) -> Self {
        Self {
            session,
        }
    }
}

#[async_trait]
impl Command<LoginCommandRequest, LoginCommandResponse> for LoginCommand {
    async fn execute(&self, req: LoginCommandRequest) -> Result<LoginCommandResponse, CommandError> {
        self.account_service.login(req.identifier.as_str(), req.password.as_str())
            .await.map_err(CommandError::from).map(LoginCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::accounts::command::login_cmd::{LoginCommand, LoginCommandRequest};
    use crate::accounts::domain::AccountService;
    use crate::accounts::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    lazy_static! {
        static ref ACCOUNT_SVC: AsyncOnce<Box<dyn AccountService>> = AsyncOnce::new(async {
                factory::create_account_service(&Configuration::new("test"), RepositoryStore::InMemory).await
            });
        static ref SUT_CMD : AsyncOnce<LoginCommand> = AsyncOnce::new(async {
                let svc = factory::create_account_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                LoginCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_login() {
        let number = format!("S-{}", Uuid::new_v4());
        let student = ACCOUNT_SVC.get().await.register_student(number.as_str(), "Ada", format!("{}@uni.edu", number).as_str(), "secret")
            .await.expect("should register");
        let cmd = SUT_CMD.get().await;
        let res = cmd.execute(LoginCommandRequest::new(number.as_str(), "secret")).await.expect("should login");
        assert_eq!(student.member_id, res.session.member_id);
        let res = cmd.execute(LoginCommandRequest::new(number.as_str(), "guess")).await;
        assert!(matches!(res, Err(CommandError::Access { .. })));
    }
}
