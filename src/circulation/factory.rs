use crate::accounts::factory::create_account_service;
use crate::catalog::factory::create_catalog_service;
use crate::circulation::domain::CirculationService;
use crate::circulation::domain::model::BorrowEntity;
use crate::circulation::domain::service::CirculationServiceImpl;
use crate::circulation::repository::ddb_borrow_repository::DDBBorrowRepository;
use crate::circulation::repository::BorrowRepository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::fines::factory::create_fine_service;
use crate::gateway::factory::create_publisher;
use crate::utils::ddb::{build_db_client, create_table};
use crate::utils::memdb::MemRepository;

pub(crate) async fn create_borrow_repository(store: RepositoryStore) -> Box<dyn BorrowRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBBorrowRepository::new(client, "borrows", "borrows_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "borrows", "borrow_id", "borrow_status", "due_at").await;
            Box::new(DDBBorrowRepository::new(client, "borrows", "borrows_ndx"))
        }
        RepositoryStore::InMemory => {
            Box::new(MemRepository::<BorrowEntity>::new("borrows", "borrow_id", "borrow_status", "due_at", None))
        }
    }
}

pub(crate) async fn create_circulation_service(config: &Configuration, store: RepositoryStore) -> Box<dyn CirculationService> {
    let borrow_repo = create_borrow_repository(store).await;
    let account_svc = create_account_service(config, store).await;
    let catalog_svc = create_catalog_service(config, store).await;
    let fine_svc = create_fine_service(config, store).await;
    let publisher = create_publisher(store.gateway_publisher()).await;
    Box::new(CirculationServiceImpl::new(config, borrow_repo, account_svc, catalog_svc, fine_svc, publisher))
}
