use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::library::{OrderStatus, PaymentStatus};
use crate::orders::domain::model::{OrderEntity, OrderLine};
use crate::utils::date::serializer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct OrderDto {
    pub order_id: String,
    pub version: i64,
    pub student_id: String,
    pub order_lines: Vec<OrderLine>,
    pub total_cents: i64,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    #[serde(with = "serializer")]
    pub ordered_at: NaiveDateTime,
}

impl From<&OrderEntity> for OrderDto {
    fn from(other: &OrderEntity) -> Self {
        Self {
            order_id: other.order_id.to_string(),
            version: other.version,
            student_id: other.student_id.to_string(),
            order_lines: other.order_lines.clone(),
            total_cents: other.total_cents,
            order_status: other.order_status,
            payment_status: other.payment_status,
            ordered_at: other.ordered_at,
        }
    }
}
