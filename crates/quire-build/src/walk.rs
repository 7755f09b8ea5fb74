use std::path::{Path, PathBuf};

use crate::BuildError;

/// Recursively list regular files under `base`.
///
/// Returns `(relative path with forward slashes, absolute path)` pairs sorted
/// by relative path.
pub(crate) fn walk_files(base: &Path) -> Result<Vec<(String, PathBuf)>, BuildError> {
    let mut result = Vec::new();
    walk_inner(base, base, &mut result)?;
    result.sort();
    Ok(result)
}

fn walk_inner(
    base: &Path,
    dir: &Path,
    result: &mut Vec<(String, PathBuf)>,
) -> Result<(), BuildError> {
    let read_err = |source| BuildError::Output {
        path: dir.to_path_buf(),
        source,
    };
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_dir() {
            walk_inner(base, &path, result)?;
        } else if let Ok(rel) = path.strip_prefix(base) {
            // Normalize to forward slashes
            let rel = rel.to_string_lossy().replace('\\', "/");
            result.push((rel, path));
        }
    }
    Ok(())
}
