//! # rivebridge bridge
//!
//! Connects a [`ReplyEngine`](engine::ReplyEngine) to a UI runtime over
//! typed ports.
//!
//! ## Components
//!
//! - `LoadCoordinator` - One knowledge load, finalized on success
//! - `MessageRouter` - Request/response relay preserving correlation tokens
//! - `BoundaryLifecycle` - Load first, attach UI and router only when ready
//! - `port` / `mount` - The typed channels and where the UI end is handed over

pub mod coordinator;
pub mod lifecycle;
pub mod mount;
pub mod port;
pub mod router;

#[cfg(test)]
mod testing;

pub use coordinator::{LoadCoordinator, Ready};
pub use lifecycle::{Attached, BoundaryLifecycle};
pub use mount::{ChannelMount, Mount, MountHandle, TryAttach};
pub use port::{BridgePort, RequestSender, ResponseReceiver, UiPort};
pub use router::{MessageRouter, RouterExit, RouterSummary};
