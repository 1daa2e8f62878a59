pub mod list_fines_cmd;
pub mod pay_fine_cmd;
