//! # rivebridge engine
//!
//! The reply engine side of the bridge.
//!
//! - `ReplyEngine` - Adapter trait the bridge drives
//! - `source` - Knowledge source resolution and file reading
//! - `TriggerTableEngine` - Small reference engine used by the host binary

pub mod adapter;
pub mod source;
pub mod trigger_table;

pub use adapter::{LoadResult, ReplyEngine};
pub use trigger_table::{TriggerTableEngine, NO_REPLY};
