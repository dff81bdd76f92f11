//! # rivebridge host
//!
//! Embeds the bridge in a process: the reference engine on one side, stdio
//! (JSON lines or an interactive REPL) standing in for the UI on the other.

pub mod commands;
pub mod wire;
