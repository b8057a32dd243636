use crate::error::{Result, TrendError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A single file is returned as is; a directory is walked for `*.json`
/// files, sorted so fingerprints do not depend on walk order.
pub fn list_snapshot_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(TrendError::PathNotFound(root.display().to_string()));
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| is_json(path))
        .collect::<Vec<_>>();
    files.sort();

    if files.is_empty() {
        return Err(TrendError::NoSnapshots(root.display().to_string()));
    }
    Ok(files)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
