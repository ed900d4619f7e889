pub mod delete_account;
pub mod get_account;
pub mod update_account;

pub use delete_account::delete_account;
pub use get_account::get_account;
pub use update_account::update_account;
