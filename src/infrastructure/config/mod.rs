//! Configuration management infrastructure
//!
//! - YAML document loading into a dotted-path store
//! - Load-once shared slot
//! - Layered logger settings using figment

pub mod loader;
pub mod shared;
pub mod store;

pub use loader::LogConfigLoader;
pub use shared::SharedConfig;
pub use store::ConfigStore;
