use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::library::PaymentStatus;
use crate::fines::domain::model::FineEntity;
use crate::utils::date::{opt_serializer, serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct FineDto {
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
}

impl From<&FineEntity> for FineDto {
    fn from(other: &FineEntity) -> Self {
        Self {
            fine_id: other.fine_id.to_string(),
            version: other.version,
            student_id: other.student_id.to_string(),
            borrow_id: other.borrow_id.to_string(),
            amount_cents: other.amount_cents,
            reason: other.reason.to_string(),
            payment_status: other.payment_status,
            assessed_at: other.assessed_at,
            paid_at: other.paid_at,
        }
    }
}
