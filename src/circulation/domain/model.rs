use chrono::{Duration, NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::BorrowStatus;
use crate::utils::date::{opt_serializer, serializer};

// BorrowEntity is one copy of a book lent to one student.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct BorrowEntity {
    pub borrow_id: String,
    pub version: i64,
    pub branch_id: String,
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
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl BorrowEntity {
    pub fn new(branch_id: &str, student_id: &str, book_id: &str, book_title: &str, loan_days: i64) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            borrow_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            student_id: student_id.to_string(),
            book_id: book_id.to_string(),
            book_title: book_title.to_string(),
            borrow_status: BorrowStatus::Borrowed,
            borrowed_at: now,
            due_at: now + Duration::days(loan_days),
            returned_at: None,
            fine_cents: 0,
            fine_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.borrow_status == BorrowStatus::Borrowed
    }
}

impl Identifiable for BorrowEntity {
    fn id(&self) -> String {
        self.borrow_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use crate::circulation::domain::model::BorrowEntity;

    #[tokio::test]
    async fn test_should_set_due_date_from_loan_period() {
        let borrow = BorrowEntity::new("main", "student", "book", "Dune", 7);
        assert!(borrow.is_active());
        assert_eq!(borrow.borrowed_at + Duration::days(7), borrow.due_at);
        let doc = serde_json::to_value(&borrow).expect("should serialize");
        assert!(doc.get("returned_at").is_none());
        assert!(doc.get("fine_reason").is_none());
    }
}
