pub mod clear_history;
pub mod get_history;
pub mod send_message;
