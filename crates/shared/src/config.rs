//! Configuration types for rivebridge

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default extension for knowledge files found in a directory source
pub const DEFAULT_EXTENSION: &str = "rive";

/// Default user id for requests that carry none
pub const DEFAULT_USER: &str = "local-user";

/// Default capacity of each port channel
pub const DEFAULT_BUFFER_SIZE: usize = 64;

/// Knowledge files to load, in order, or a directory to scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KnowledgeSource {
    /// Explicit file list; loaded in the given order
    Files { files: Vec<PathBuf> },

    /// Every file with `extension` directly inside `directory`, sorted by name
    Directory {
        directory: PathBuf,
        #[serde(default = "default_extension")]
        extension: String,
    },
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl KnowledgeSource {
    pub fn files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        KnowledgeSource::Files {
            files: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        KnowledgeSource::Directory {
            directory: path.into(),
            extension: default_extension(),
        }
    }

    /// An empty file list; loading it is a valid no-op
    pub fn empty() -> Self {
        KnowledgeSource::Files { files: Vec::new() }
    }
}

impl Default for KnowledgeSource {
    fn default() -> Self {
        Self::empty()
    }
}

/// Bridge configuration file format (rivebridge.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Knowledge loaded before the UI is attached
    #[serde(default)]
    pub knowledge: KnowledgeSource,

    /// User id substituted when a request names none
    #[serde(default = "default_user")]
    pub default_user: String,

    /// Capacity of the request and response channels
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            knowledge: KnowledgeSource::default(),
            default_user: default_user(),
            buffer_size: default_buffer_size(),
        }
    }
}

impl BridgeConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_knowledge(mut self, knowledge: KnowledgeSource) -> Self {
        self.knowledge = knowledge;
        self
    }

    /// Reject settings the bridge cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.buffer_size == 0 {
            return Err(crate::BridgeError::Config(
                "bufferSize must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
