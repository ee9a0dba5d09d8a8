//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{ApiConfig, FileConfig};
pub use loader::ConfigLoader;
