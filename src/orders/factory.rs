use crate::accounts::factory::create_account_service;
use crate::catalog::factory::create_catalog_service;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::orders::domain::OrderService;
use crate::orders::domain::model::OrderEntity;
use crate::orders::domain::service::OrderServiceImpl;
use crate::orders::repository::ddb_order_repository::DDBOrderRepository;
use crate::orders::repository::OrderRepository;
use crate::utils::ddb::{build_db_client, create_table};
use crate::utils::memdb::MemRepository;

pub(crate) async fn create_order_repository(store: RepositoryStore) -> Box<dyn OrderRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBOrderRepository::new(client, "orders", "orders_ndx"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "orders", "order_id", "order_status", "ordered_at").await;
            Box::new(DDBOrderRepository::new(client, "orders", "orders_ndx"))
        }
        RepositoryStore::InMemory => {
            Box::new(MemRepository::<OrderEntity>::new("orders", "order_id", "order_status", "ordered_at", None))
        }
    }
}

pub(crate) async fn create_order_service(config: &Configuration, store: RepositoryStore) -> Box<dyn OrderService> {
    let order_repo = create_order_repository(store).await;
    let account_svc = create_account_service(config, store).await;
    let catalog_svc = create_catalog_service(config, store).await;
    let publisher = create_publisher(store.gateway_publisher()).await;
    Box::new(OrderServiceImpl::new(config, order_repo, account_svc, catalog_svc, publisher))
}
