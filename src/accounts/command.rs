pub mod get_member_cmd;
pub mod login_cmd;
pub mod logout_cmd;
pub mod register_member_cmd;
