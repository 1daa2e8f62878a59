use chrono::NaiveDateTime;
use crate::core::domain::Configuration;

// Penalty is the amount charged when a borrow is closed and the reason shown to the student.
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct Penalty {
    pub amount_cents: i64,
    pub reason: String,
}

// days late are counted by calendar date so that a book due today is on time all day
pub(crate) fn days_late(due_at: NaiveDateTime, returned_at: NaiveDateTime) -> i64 {
    (returned_at.date() - due_at.date()).num_days().max(0)
}

pub(crate) fn late_return(config: &Configuration, due_at: NaiveDateTime, returned_at: NaiveDateTime) -> Penalty {
    let days = days_late(due_at, returned_at);
    if days == 0 {
        return Penalty { amount_cents: 0, reason: "Returned on time".to_string() };
    }
    let amount_cents = days * config.fine_per_day_cents;
    if amount_cents > config.max_fine_cents {
        Penalty { amount_cents: config.max_fine_cents, reason: format!("Overdue by {} days (capped)", days) }
    } else {
        Penalty { amount_cents, reason: format!("Overdue by {} days", days) }
    }
}

// a lost copy costs the full price, never capped
pub(crate) fn lost_book(price_cents: i64) -> Penalty {
    Penalty { amount_cents: price_cents.max(0), reason: "Book lost - charged full price".to_string() }
}
