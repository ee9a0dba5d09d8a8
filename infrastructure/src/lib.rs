//! Infrastructure layer for academy-roster
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading.

pub mod config;
pub mod http;

// Re-export commonly used types
pub use config::{ApiConfig, ConfigLoader, FileConfig};
pub use http::HttpDirectoryGateway;
