pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::library::{LibraryResult, OrderStatus, PaymentStatus};
use crate::orders::dto::OrderDto;

#[async_trait]
pub(crate) trait OrderService: Sync + Send {
    // orders catalog books for a student, one line per book
    async fn place_order(&self, student_id: &str, book_ids: &[String]) -> LibraryResult<OrderDto>;
    // asks the library to acquire a title it does not hold
    async fn request_book(&self, student_id: &str, title: &str, author: &str) -> LibraryResult<OrderDto>;
    async fn list_student_orders(&self, student_id: &str) -> LibraryResult<Vec<OrderDto>>;
    async fn list_orders(&self, status: Option<OrderStatus>) -> LibraryResult<Vec<OrderDto>>;
    async fn update_orders(&self, order_ids: &[String], order_status: OrderStatus,
                           payment_status: PaymentStatus) -> LibraryResult<Vec<OrderDto>>;
}
