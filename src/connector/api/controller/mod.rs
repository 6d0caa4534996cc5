pub mod catalog_controller;
pub mod quote_controller;
pub mod search_controller;

pub use catalog_controller::CatalogController;
pub use quote_controller::QuoteController;
pub use search_controller::SearchController;
