//! Reading and updating frontmatter in markdown files on disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use geotag_core::metadata::parse_yaml_mapping;
use geotag_core::{apply_writes, FieldWrite, Mapping};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::frontmatter;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid frontmatter in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize frontmatter for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{path} has no frontmatter to update")]
    MissingFrontmatter { path: PathBuf },

    #[error("{path} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("invalid listing pattern for {path}: {reason}")]
    Pattern { path: PathBuf, reason: String },
}

/// Per-document metadata access used by the batch runner.
///
/// `read_metadata` returns `Ok(None)` when the document has no frontmatter
/// mapping. `update_metadata` applies every write in one mutation per
/// document; a failed update leaves the document as it was.
pub trait DocumentStore {
    fn read_metadata(&self, path: &Path) -> Result<Option<Mapping>, StoreError>;

    fn update_metadata(&self, path: &Path, writes: &[FieldWrite]) -> Result<(), StoreError>;
}

/// [`DocumentStore`] over markdown files with a leading `---` YAML block.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownStore;

impl MarkdownStore {
    fn read_text(path: &Path) -> Result<String, StoreError> {
        std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(path: &Path, yaml: &str) -> Result<Option<Mapping>, StoreError> {
        parse_yaml_mapping(yaml).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl DocumentStore for MarkdownStore {
    fn read_metadata(&self, path: &Path) -> Result<Option<Mapping>, StoreError> {
        let text = Self::read_text(path)?;
        match frontmatter::split(&text) {
            Some(parts) => Self::parse(path, parts.yaml),
            None => Ok(None),
        }
    }

    fn update_metadata(&self, path: &Path, writes: &[FieldWrite]) -> Result<(), StoreError> {
        let text = Self::read_text(path)?;
        let missing = || StoreError::MissingFrontmatter {
            path: path.to_path_buf(),
        };

        let parts = frontmatter::split(&text).ok_or_else(missing)?;
        let mut metadata = Self::parse(path, parts.yaml)?.ok_or_else(missing)?;
        apply_writes(&mut metadata, writes);

        let rendered = frontmatter::render(&metadata, parts.body, parts.line_ending).map_err(
            |source| StoreError::Serialize {
                path: path.to_path_buf(),
                source,
            },
        )?;

        replace_file(path, rendered.as_bytes())?;
        tracing::debug!(path = %path.display(), writes = writes.len(), "frontmatter updated");
        Ok(())
    }
}

/// Replaces the contents of `path` by writing a sibling temporary file and
/// renaming it over the original, so an interrupted write never leaves a
/// truncated document behind.
fn replace_file(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let io_error = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(io_error)?;
    staged.write_all(contents).map_err(io_error)?;
    staged.as_file().sync_all().map_err(io_error)?;
    staged.persist(path).map_err(|e| io_error(e.error))?;
    Ok(())
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
