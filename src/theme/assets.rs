//! Static assets copied verbatim into the output directory

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Copy every file under `static_dir` into `public_dir`, keeping relative
/// paths. Entries whose path has a component starting with `_` or `.` are
/// skipped. Returns the number of files copied.
pub fn copy_static(static_dir: &Path, public_dir: &Path) -> Result<usize> {
    if !static_dir.exists() {
        return Ok(0);
    }

    let mut copied = 0;

    for entry in WalkDir::new(static_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(static_dir)?;
        let hidden = relative.components().any(|c| {
            c.as_os_str()
                .to_str()
                .map(|s| s.starts_with('_') || s.starts_with('.'))
                .unwrap_or(false)
        });
        if hidden {
            continue;
        }

        let dest = public_dir.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)?;
        tracing::debug!("Copied: {:?} -> {:?}", path, dest);
        copied += 1;
    }

    Ok(copied)
}
