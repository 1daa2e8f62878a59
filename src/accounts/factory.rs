use crate::accounts::domain::AccountService;
use crate::accounts::domain::service::AccountServiceImpl;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::members::factory::{create_member_repository, create_session_repository};

pub(crate) async fn create_account_service(config: &Configuration, store: RepositoryStore) -> Box<dyn AccountService> {
    let member_repo = create_member_repository(store).await;
    let session_repo = create_session_repository(store).await;
    let publisher = create_publisher(store.gateway_publisher()).await;
    Box::new(AccountServiceImpl::new(config, member_repo, session_repo, publisher))
}
