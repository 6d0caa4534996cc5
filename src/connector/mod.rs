//! # Connector Layer
//!
//! Adapters implementing the application interfaces:
//! - Generation (GigaChat cloud API with OAuth token exchange, local Ollama)
//! - Storage (catalog source and cache files, JSON quote log)
//! - Rendering (tera HTML proposal)
//!
//! plus the `api` entry points: dependency container, CLI router and HTTP server.

pub mod adapter;
pub mod api;

pub use adapter::*;
