pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::account;
pub use domain::authentication;
pub use domain::short_url;
pub use outbound::repositories;
