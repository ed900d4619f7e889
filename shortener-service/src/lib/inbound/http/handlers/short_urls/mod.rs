pub mod create_short_url;
pub mod delete_short_url;
pub mod get_short_url;
pub mod list_short_urls;
pub mod redirect;
pub mod update_short_url;

pub use create_short_url::create_short_url;
pub use delete_short_url::delete_short_url;
pub use get_short_url::get_short_url;
pub use list_short_urls::list_short_urls;
pub use redirect::redirect;
pub use update_short_url::update_short_url;
