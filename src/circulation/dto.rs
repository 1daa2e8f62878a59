use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::circulation::domain::model::BorrowEntity;
use crate::core::library::BorrowStatus;
use crate::utils::date::{opt_serializer, serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BorrowDto {
    pub borrow_id: String,
    pub version: i64,
    pub student_id: String,
    pub book_id: String,
    pub book_title: String,
    pub borrow_status: BorrowStatus,
    #[serde(with = "serializer")]
    pub borrowed_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
    #[serde(default, with = "opt_serializer", skip_serializing_if = "Option::is_none")]
    pub returned_at: Option<NaiveDateTime>,
    pub fine_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fine_reason: Option<String>,
}

impl From<&BorrowEntity> for BorrowDto {
    fn from(other: &BorrowEntity) -> Self {
        Self {
            borrow_id: other.borrow_id.to_string(),
            version: other.version,
            student_id: other.student_id.to_string(),
            book_id: other.book_id.to_string(),
            book_title: other.book_title.to_string(),
            borrow_status: other.borrow_status,
            borrowed_at: other.borrowed_at,
            due_at: other.due_at,
            returned_at: other.returned_at,
            fine_cents: other.fine_cents,
            fine_reason: other.fine_reason.clone(),
        }
    }
}
