//! Error types for rivebridge

use std::path::PathBuf;
use thiserror::Error;

/// Error raised when a knowledge source cannot be loaded.
///
/// A load either registers every file of its batch or fails with exactly
/// one of these.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Knowledge file '{}' is unreadable: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Knowledge file '{}' line {line}: {detail}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        detail: String,
    },

    #[error("Knowledge directory '{}' could not be scanned: {detail}", .path.display())]
    Directory { path: PathBuf, detail: String },
}

impl LoadError {
    /// Human-readable detail, as reported to the diagnostics logger
    pub fn detail(&self) -> String {
        self.to_string()
    }
}

/// Lifecycle phase of a load coordinator, used in sequencing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    LoadFailed,
}

impl std::fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LoadPhase::Idle => "idle",
            LoadPhase::Loading => "loading",
            LoadPhase::Loaded => "loaded",
            LoadPhase::LoadFailed => "load-failed",
        };
        f.write_str(name)
    }
}

/// General bridge error type
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Load coordinator already used (phase: {0})")]
    CoordinatorSpent(LoadPhase),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Port closed: {0}")]
    PortClosed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
