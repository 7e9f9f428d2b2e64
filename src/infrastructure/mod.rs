//! Infrastructure layer module
//!
//! Configuration loading and logging setup. Persistence adapters live in
//! `crate::adapters`; they satisfy the port traits defined in the domain
//! layer.

pub mod config;
pub mod logging;

pub use config::{ConfigError, ConfigLoader};
pub use logging::init_logging;
