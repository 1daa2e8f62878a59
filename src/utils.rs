pub mod date;
pub mod ddb;
pub mod logs;
pub mod memdb;
pub mod password;
