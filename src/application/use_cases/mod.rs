mod assemble_quote;
mod catalog_store;
pub mod prompts;
mod retrieve_products;

pub use assemble_quote::*;
pub use catalog_store::*;
pub use retrieve_products::*;
