//! # Application Layer
//!
//! Interfaces at the external seams and the use cases that drive the
//! catalog, retrieval and quote assembly pipeline.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
