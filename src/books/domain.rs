use crate::core::domain::Identifiable;

pub mod model;

pub(crate) trait Book: Identifiable {
    fn title(&self) -> String;
    fn price_cents(&self) -> i64;
    fn available_copies(&self) -> i64;
}
