use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::PaymentStatus;
use crate::utils::date::{opt_serializer, serializer};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct FineEntity {
    pub fine_id: String,
    pub version: i64,
    pub student_id: String,
    pub borrow_id: String,
    pub amount_cents: i64,
    pub reason: String,
    pub payment_status: PaymentStatus,
    #[serde(with = "serializer")]
    pub assessed_at: NaiveDateTime,
    #[serde(default, with = "opt_serializer", skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<NaiveDateTime>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl FineEntity {
    pub fn new(student_id: &str, borrow_id: &str, amount_cents: i64, reason: &str) -> Self {
        Self {
            fine_id: Uuid::new_v4().to_string(),
            version: 0,
            student_id: student_id.to_string(),
            borrow_id: borrow_id.to_string(),
            amount_cents,
            reason: reason.to_string(),
            payment_status: PaymentStatus::Unpaid,
            assessed_at: Utc::now().naive_utc(),
            paid_at: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

impl Identifiable for FineEntity {
    fn id(&self) -> String {
        self.fine_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::PaymentStatus;
    use crate::fines::domain::model::FineEntity;

    #[tokio::test]
    async fn test_should_serialize_unpaid_fine_without_paid_at() {
        let fine = FineEntity::new("student", "borrow", 3000, "Overdue by 3 days");
        assert_eq!(PaymentStatus::Unpaid, fine.payment_status);
        assert!(!fine.is_paid());
        let doc = serde_json::to_value(&fine).expect("should serialize");
        assert!(doc.get("paid_at").is_none());
        let back: FineEntity = serde_json::from_value(doc).expect("should deserialize");
        assert_eq!(fine, back);
    }
}
