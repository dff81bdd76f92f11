//! Arguments shared by every command that loads knowledge

use clap::Args;
use shared::{BridgeConfig, KnowledgeSource, DEFAULT_EXTENSION};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Args)]
pub struct BridgeArgs {
    /// Configuration file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Knowledge file to load; repeat for several (overrides the config file)
    #[arg(short = 'f', long = "file")]
    pub files: Vec<PathBuf>,

    /// Knowledge directory to load (overrides the config file)
    #[arg(short, long, conflicts_with = "files")]
    pub directory: Option<PathBuf>,

    /// Extension of files picked up from --directory
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,
}

impl BridgeArgs {
    /// Build the effective configuration
    pub fn resolve(&self) -> shared::Result<BridgeConfig> {
        let config = match &self.config {
            Some(path) => BridgeConfig::from_file(path)?,
            None => BridgeConfig::default(),
        };

        let config = if let Some(directory) = &self.directory {
            config.with_knowledge(KnowledgeSource::Directory {
                directory: directory.clone(),
                extension: self.extension.clone(),
            })
        } else if !self.files.is_empty() {
            config.with_knowledge(KnowledgeSource::files(self.files.iter().cloned()))
        } else {
            config
        };

        Ok(config)
    }
}
