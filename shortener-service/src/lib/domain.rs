pub mod account;
pub mod authentication;
pub mod short_url;
