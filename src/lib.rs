pub mod core;
pub mod utils;
pub mod gateway;
pub mod members;
pub mod accounts;
pub mod books;
pub mod suppliers;
pub mod catalog;
pub mod fines;
pub mod circulation;
pub mod orders;
