//! # Domain Layer
//!
//! Catalog, quote and token models, the error taxonomy, and the pure text
//! services the pipeline relies on. Independent of transports and storage.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
