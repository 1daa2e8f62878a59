pub mod list_orders_cmd;
pub mod place_order_cmd;
pub mod request_book_cmd;
pub mod update_orders_cmd;
