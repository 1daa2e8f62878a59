use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::core::domain::Identifiable;
use crate::core::library::{OrderStatus, PaymentStatus};
use crate::utils::date::serializer;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct OrderLine {
    // absent for requests of titles outside the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_id: Option<String>,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    pub price_cents: i64,
}

impl OrderLine {
    pub fn requested(title: &str, author: &str) -> Self {
        Self {
            book_id: None,
            title: title.trim().to_string(),
            author: author.trim().to_string(),
            supplier_id: None,
            price_cents: 0,
        }
    }
}

impl From<&BookDto> for OrderLine {
    fn from(book: &BookDto) -> Self {
        Self {
            book_id: Some(book.book_id.to_string()),
            title: book.title.to_string(),
            author: book.author.to_string(),
            supplier_id: book.supplier_id.clone(),
            price_cents: book.price_cents,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct OrderEntity {
    pub order_id: String,
    pub version: i64,
    pub branch_id: String,
    pub student_id: String,
    pub order_lines: Vec<OrderLine>,
    pub total_cents: i64,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    #[serde(with = "serializer")]
    pub ordered_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl OrderEntity {
    pub fn new(branch_id: &str, student_id: &str, order_lines: Vec<OrderLine>) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            order_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            student_id: student_id.to_string(),
            total_cents: order_lines.iter().map(|l| l.price_cents).sum(),
            order_lines,
            order_status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            ordered_at: now,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Identifiable for OrderEntity {
    fn id(&self) -> String {
        self.order_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{OrderStatus, PaymentStatus};
    use crate::orders::domain::model::{OrderEntity, OrderLine};

    #[tokio::test]
    async fn test_should_total_order_lines() {
        let mut priced = OrderLine::requested("Dune", "Frank Herbert");
        priced.price_cents = 1250;
        let order = OrderEntity::new("main", "student", vec![priced, OrderLine::requested("Emma", "Jane Austen")]);
        assert_eq!(1250, order.total_cents);
        assert_eq!(OrderStatus::Pending, order.order_status);
        assert_eq!(PaymentStatus::Unpaid, order.payment_status);
    }
}
