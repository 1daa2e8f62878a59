use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::fines::domain::FineService;
use crate::fines::domain::model::FineEntity;
use crate::fines::domain::service::FineServiceImpl;
use crate::fines::repository::ddb_fine_repository::DDBFineRepository;
use crate::fines::repository::FineRepository;
use crate::gateway::factory::create_publisher;
use crate::utils::ddb::{build_db_client, create_table};
use crate::utils::memdb::MemRepository;

pub(crate) async fn create_fine_repository(store: RepositoryStore) -> Box<dyn FineRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBFineRepository::new(client, "fines", "fines_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "fines", "fine_id", "student_id", "payment_status").await;
            Box::new(DDBFineRepository::new(client, "fines", "fines_ndx"))
        }
        RepositoryStore::InMemory => {
            Box::new(MemRepository::<FineEntity>::new("fines", "fine_id", "student_id", "payment_status", None))
        }
    }
}

pub(crate) async fn create_fine_service(_config: &Configuration, store: RepositoryStore) -> Box<dyn FineService> {
    let fine_repo = create_fine_repository(store).await;
    let publisher = create_publisher(store.gateway_publisher()).await;
    Box::new(FineServiceImpl::new(fine_repo, publisher))
}
