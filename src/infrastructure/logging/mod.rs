//! Logging infrastructure
//!
//! Channel loggers using tracing and tracing-subscriber:
//! - One file per channel, text or JSON records
//! - Size-based rotation with backup pruning and compression
//! - Optional stdout mirror
//! - Lazily populated registry

pub mod channel;
pub mod registry;
pub mod rotation;

pub use channel::ChannelLogger;
pub use registry::{LoggerRegistry, DEFAULT_CHANNEL};
pub use rotation::{RotatingFile, RotatingWriter, RotationPolicy};
