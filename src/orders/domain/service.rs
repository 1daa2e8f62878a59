use async_trait::async_trait;
use tracing::{debug, info};
use crate::accounts::domain::{AccountService, Member};
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult, OrderStatus, PaymentStatus};
use crate::gateway::events::EventPublisher;
use crate::orders::domain::OrderService;
use crate::orders::domain::model::{OrderEntity, OrderLine};
use crate::orders::dto::OrderDto;
use crate::orders::repository::OrderRepository;

pub(crate) struct OrderServiceImpl {
    branch_id: String,
    max_order_items: usize,
    order_repository: Box<dyn OrderRepository>,
    account_service: Box<dyn AccountService>,
    catalog_service: Box<dyn CatalogService>,
    events_publisher: Box<dyn EventPublisher>,
}

impl OrderServiceImpl {
    pub(crate) fn new(config: &Configuration, order_repository: Box<dyn OrderRepository>,
                      account_service: Box<dyn AccountService>, catalog_service: Box<dyn CatalogService>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            max_order_items: config.max_order_items,
            order_repository,
            account_service,
            catalog_service,
            events_publisher,
        }
    }

    async fn check_student(&self, student_id: &str) -> LibraryResult<()> {
        let member = self.account_service.find_member_by_id(student_id).await?;
        if !member.is_student() {
            return Err(LibraryError::validation(
                format!("only students can order books, {} is a {}", member.username, member.member_role).as_str(),
                Some("400".to_string())));
        }
        Ok(())
    }

    async fn save(&self, order: OrderEntity, event_name: &str) -> LibraryResult<OrderDto> {
        self.order_repository.create(&order).await?;
        let dto = OrderDto::from(&order);
        info!("{} ordered {} books for {} cents", dto.student_id, dto.order_lines.len(), dto.total_cents);
        let _ = self.events_publisher.publish(&DomainEvent::added(
            event_name, "orders", dto.order_id.as_str(), &dto)?).await?;
        Ok(dto)
    }
}

#[async_trait]
impl OrderService for OrderServiceImpl {
    async fn place_order(&self, student_id: &str, book_ids: &[String]) -> LibraryResult<OrderDto> {
        let mut unique_ids: Vec<&str> = vec![];
        for id in book_ids.iter().map(|id| id.trim()).filter(|id| !id.is_empty()) {
            if !unique_ids.contains(&id) {
                unique_ids.push(id);
            }
        }
        if unique_ids.is_empty() || unique_ids.len() > self.max_order_items {
            return Err(LibraryError::validation(
                format!("an order needs between 1 and {} books, got {}", self.max_order_items, unique_ids.len()).as_str(),
                Some("400".to_string())));
        }
        self.check_student(student_id).await?;
        let mut lines = vec![];
        for id in unique_ids {
            let book = self.catalog_service.find_book_by_id(id).await?;
            lines.push(OrderLine::from(&book));
        }
        self.save(OrderEntity::new(self.branch_id.as_str(), student_id, lines), "order_placed").await
    }

    async fn request_book(&self, student_id: &str, title: &str, author: &str) -> LibraryResult<OrderDto> {
        if title.trim().is_empty() || author.trim().is_empty() {
            return Err(LibraryError::validation("title and author are required", Some("400".to_string())));
        }
        self.check_student(student_id).await?;
        let line = OrderLine::requested(title, author);
        self.save(OrderEntity::new(self.branch_id.as_str(), student_id, vec![line]), "book_requested").await
    }

    async fn list_student_orders(&self, student_id: &str) -> LibraryResult<Vec<OrderDto>> {
        let mut orders = self.order_repository.find_all(Some(student_id)).await?;
        orders.sort_by(|a, b| b.ordered_at.cmp(&a.ordered_at));
        Ok(orders.iter().map(OrderDto::from).collect())
    }

    async fn list_orders(&self, status: Option<OrderStatus>) -> LibraryResult<Vec<OrderDto>> {
        let mut orders = match status {
            Some(status) => self.order_repository.find_by_status(status, None).await?,
            None => self.order_repository.find_all(None).await?,
        };
        orders.retain(|o| o.branch_id == self.branch_id);
        orders.sort_by(|a, b| a.ordered_at.cmp(&b.ordered_at));
        debug!("found {} orders", orders.len());
        Ok(orders.iter().map(OrderDto::from).collect())
    }

    async fn update_orders(&self, order_ids: &[String], order_status: OrderStatus,
                           payment_status: PaymentStatus) -> LibraryResult<Vec<OrderDto>> {
        if order_ids.is_empty() {
            return Err(LibraryError::validation("select at least one order to update", Some("400".to_string())));
        }
        // every order must exist before any of them changes
        let mut orders: Vec<OrderEntity> = vec![];
        for id in order_ids {
            if orders.iter().any(|o| o.order_id == *id) {
                continue;
            }
            orders.push(self.order_repository.get(id.as_str()).await?);
        }
        let mut updated = vec![];
        for mut order in orders {
            let id = order.order_id.to_string();
            order.order_status = order_status;
            order.payment_status = payment_status;
            self.order_repository.update(&order).await?;
            let dto = OrderDto::from(&self.order_repository.get(id.as_str()).await?);
            let _ = self.events_publisher.publish(&DomainEvent::updated(
                "order_updated", "orders", id.as_str(), &dto)?).await?;
            updated.push(dto);
        }
        info!("updated {} orders to {} / {}", updated.len(), order_status, payment_status);
        Ok(updated)
    }
}
