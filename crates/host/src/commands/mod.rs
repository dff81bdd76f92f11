//! rivebridge commands

pub mod args;
pub mod chat;
pub mod check;
pub mod serve;

pub use args::BridgeArgs;
pub use chat::ChatCommand;
pub use check::CheckCommand;
pub use serve::ServeCommand;
