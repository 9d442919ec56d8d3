//! Page source enumeration.

use std::path::{Path, PathBuf};

/// File name convention for page sources.
pub const PAGE_FILE_NAME: &str = "index.md";

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("source path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory entry in {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Produce the ordered set of page source files under a root path.
///
/// A directory is walked recursively for files named `index.md`; the
/// result is sorted so enumeration order (and therefore last-writer-wins
/// conflict resolution downstream) is reproducible. A single `index.md`
/// file is the sole input. Any other existing path yields an empty set.
/// A missing root is a batch-fatal error.
pub fn resolve_root(root: &Path) -> Result<Vec<PathBuf>, SourceError> {
    if root.is_dir() {
        let mut files = Vec::new();
        walk_directory(root, &mut files)?;
        files.sort();
        Ok(files)
    } else if root.is_file() {
        if root.file_name().is_some_and(|name| name == PAGE_FILE_NAME) {
            Ok(vec![root.to_path_buf()])
        } else {
            Ok(Vec::new())
        }
    } else {
        Err(SourceError::PathNotFound(root.to_path_buf()))
    }
}

/// Recursively collect page files, skipping hidden entries.
fn walk_directory(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), SourceError> {
    let entries = std::fs::read_dir(dir).map_err(|e| SourceError::ReadDir {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| SourceError::ReadEntry {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        let file_name = entry.file_name();

        // Skip hidden files and directories
        if file_name.to_string_lossy().starts_with('.') {
            continue;
        }

        if path.is_dir() {
            walk_directory(&path, files)?;
        } else if path.is_file() && file_name == PAGE_FILE_NAME {
            files.push(path);
        }
    }

    Ok(())
}
