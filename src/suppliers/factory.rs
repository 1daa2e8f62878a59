use crate::books::factory::create_book_repository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::suppliers::domain::model::SupplierEntity;
use crate::suppliers::domain::service::SupplierServiceImpl;
use crate::suppliers::domain::SupplierService;
use crate::suppliers::repository::ddb_supplier_repository::DDBSupplierRepository;
use crate::suppliers::repository::SupplierRepository;
use crate::utils::ddb::{build_db_client, create_table};
use crate::utils::memdb::MemRepository;

pub(crate) async fn create_supplier_repository(store: RepositoryStore) -> Box<dyn SupplierRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBSupplierRepository::new(client, "suppliers", "suppliers_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "suppliers", "supplier_id", "branch_id", "supplier_name").await;
            Box::new(DDBSupplierRepository::new(client, "suppliers", "suppliers_ndx"))
        }
        RepositoryStore::InMemory => {
            Box::new(MemRepository::<SupplierEntity>::new("suppliers", "supplier_id", "branch_id", "supplier_name", None))
        }
    }
}

pub(crate) async fn create_supplier_service(config: &Configuration, store: RepositoryStore) -> Box<dyn SupplierService> {
    let supplier_repo = create_supplier_repository(store).await;
    let book_repo = create_book_repository(store).await;
    let publisher = create_publisher(store.gateway_publisher()).await;
    Box::new(SupplierServiceImpl::new(config, supplier_repo, book_repo, publisher))
}
