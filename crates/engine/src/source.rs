//! Knowledge source resolution - turn a KnowledgeSource into file contents

use shared::{KnowledgeSource, LoadError};
use std::path::{Path, PathBuf};

/// A knowledge file read into memory
#[derive(Debug, Clone)]
pub struct KnowledgeFile {
    pub path: PathBuf,
    pub content: String,
}

/// Expand a source into the ordered list of files it names
pub async fn resolve(source: &KnowledgeSource) -> Result<Vec<PathBuf>, LoadError> {
    match source {
        KnowledgeSource::Files { files } => Ok(files.clone()),
        KnowledgeSource::Directory {
            directory,
            extension,
        } => scan_directory(directory, extension).await,
    }
}

async fn scan_directory(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, LoadError> {
    let metadata = tokio::fs::metadata(dir)
        .await
        .map_err(|e| LoadError::Directory {
            path: dir.to_path_buf(),
            detail: e.to_string(),
        })?;

    if !metadata.is_dir() {
        return Err(LoadError::Directory {
            path: dir.to_path_buf(),
            detail: "not a directory".to_string(),
        });
    }

    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        glob::Pattern::escape(extension)
    );

    let entries = glob::glob(&pattern).map_err(|e| LoadError::Directory {
        path: dir.to_path_buf(),
        detail: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| LoadError::Directory {
            path: dir.to_path_buf(),
            detail: e.to_string(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

/// Read every file, stopping at the first unreadable one
pub async fn read_all(paths: &[PathBuf]) -> Result<Vec<KnowledgeFile>, LoadError> {
    let mut files = Vec::with_capacity(paths.len());

    for path in paths {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LoadError::Unreadable {
                path: path.clone(),
                source,
            })?;
        files.push(KnowledgeFile {
            path: path.clone(),
            content,
        });
    }

    Ok(files)
}
