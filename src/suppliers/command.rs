pub mod add_supplier_cmd;
pub mod get_supplier_cmd;
pub mod remove_supplier_cmd;
pub mod search_suppliers_cmd;
pub mod update_supplier_cmd;
