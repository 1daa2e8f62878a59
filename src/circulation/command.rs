pub mod book_history_cmd;
pub mod borrow_book_cmd;
pub mod list_borrowed_cmd;
pub mod query_overdue_cmd;
pub mod report_lost_cmd;
pub mod return_book_cmd;
