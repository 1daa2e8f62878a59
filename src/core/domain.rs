use std::str::FromStr;
use serde::{Deserialize, Serialize};

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
    fn version(&self) -> i64;
}

// Configuration abstracts the business rules of a library branch. Money is kept in cents.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub branch_id: String,
    pub book_loan_days: i64,
    pub fine_per_day_cents: i64,
    pub max_fine_cents: i64,
    pub session_ttl_minutes: i64,
    pub max_order_items: usize,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            book_loan_days: 7,
            fine_per_day_cents: 1_000,
            max_fine_cents: 10_000,
            session_ttl_minutes: 480,
            max_order_items: 20,
        }
    }

    // Overrides defaults with BOOKHIVE_* variables, ignoring values that do not parse.
    pub fn from_env(branch_id: &str) -> Self {
        let defaults = Configuration::new(branch_id);
        Configuration {
            branch_id: std::env::var("BOOKHIVE_BRANCH").unwrap_or(defaults.branch_id),
            book_loan_days: env_or("BOOKHIVE_LOAN_DAYS", defaults.book_loan_days),
            fine_per_day_cents: env_or("BOOKHIVE_FINE_PER_DAY_CENTS", defaults.fine_per_day_cents),
            max_fine_cents: env_or("BOOKHIVE_MAX_FINE_CENTS", defaults.max_fine_cents),
            session_ttl_minutes: env_or("BOOKHIVE_SESSION_TTL_MINUTES", defaults.session_ttl_minutes),
            max_order_items: env_or("BOOKHIVE_MAX_ORDER_ITEMS", defaults.max_order_items),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use crate::core::domain::{Configuration, env_or};

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!("test", config.branch_id.as_str());
        assert_eq!(7, config.book_loan_days);
        assert_eq!(1_000, config.fine_per_day_cents);
        assert_eq!(10_000, config.max_fine_cents);
        assert_eq!(20, config.max_order_items);
    }

    #[tokio::test]
    async fn test_should_fall_back_on_bad_env_values() {
        std::env::set_var("BOOKHIVE_TEST_LOAN_DAYS", "fourteen");
        assert_eq!(7, env_or("BOOKHIVE_TEST_LOAN_DAYS", 7));
        std::env::set_var("BOOKHIVE_TEST_LOAN_DAYS", " 14 ");
        assert_eq!(14, env_or("BOOKHIVE_TEST_LOAN_DAYS", 7));
        assert_eq!(3, env_or("BOOKHIVE_TEST_UNSET_VALUE", 3));
    }
}
