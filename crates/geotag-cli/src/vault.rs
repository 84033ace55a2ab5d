//! Enumerates the markdown documents under a folder.

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::store::StoreError;

/// Lists every `.md` file under `root`, recursively, sorted by path.
///
/// Hidden files and anything under a hidden directory are skipped.
///
/// # Errors
///
/// Returns [`StoreError::NotADirectory`] if `root` is not a directory, or
/// [`StoreError::Pattern`] if a listing pattern cannot be built from it.
pub(crate) fn list_markdown_files(root: &Path) -> Result<Vec<PathBuf>, StoreError> {
    if !root.is_dir() {
        return Err(StoreError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    // glob drops a leading `./` from the paths it yields, so match against
    // the root without one.
    let base: PathBuf = root
        .components()
        .skip_while(|c| matches!(c, Component::CurDir))
        .collect();
    let pattern = if base.as_os_str().is_empty() {
        "**/*.md".to_owned()
    } else {
        format!("{}/**/*.md", Pattern::escape(&base.to_string_lossy()))
    };
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };
    let entries = glob::glob_with(&pattern, options).map_err(|e| StoreError::Pattern {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable path");
                continue;
            }
        };

        let rel = path.strip_prefix(&base).unwrap_or(path.as_path());
        if rel
            .components()
            .any(|c| c.as_os_str().to_str().is_some_and(|s| s.starts_with('.')))
        {
            continue;
        }
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    tracing::debug!(root = %root.display(), count = files.len(), "listed markdown files");
    Ok(files)
}
