//! # rivebridge shared
//!
//! Types used on both sides of the bridge: boundary messages, knowledge
//! sources, configuration, errors and the diagnostics logger.

pub mod config;
pub mod error;
pub mod logger;
pub mod message;

// Re-exports
pub use config::*;
pub use error::*;
pub use logger::*;
pub use message::*;
