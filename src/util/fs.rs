//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;

/// Ensure a directory exists, creating it and its parents if necessary.
///
/// Existing directories and their contents are left untouched.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Return the last entry in `dir` matching `pattern`, in glob order.
///
/// Matches may be files or directories (`*.xcodeproj` bundles are
/// directories).
pub fn last_match(dir: &Path, pattern: &str) -> Result<Option<PathBuf>> {
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let full_pattern = Path::new(&escaped).join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let mut last = None;
    for entry in glob(&pattern_str).with_context(|| format!("invalid glob pattern: {}", pattern))? {
        match entry {
            Ok(path) => last = Some(path),
            Err(e) => {
                tracing::warn!("glob error: {}", e);
            }
        }
    }

    Ok(last)
}
