pub mod container;
pub mod controller;
pub mod http;
pub mod router;

pub use container::Container;
pub use http::{http_router, serve};
pub use router::Router;
