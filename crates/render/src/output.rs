//! Card file naming and writing.

use roster_core::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Make `name` safe to use as a single path component.
///
/// Spaces and path separators become underscores; empty, `.` and `..` become
/// a single underscore.
pub fn safe_component(name: &str) -> String {
    let replaced: String = name
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match replaced.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => replaced,
    }
}

/// `<base>/<cohort>/<group>/<group>_<index>.png`
pub fn card_output_path(base: &Path, cohort: &str, group_name: &str, index: usize) -> PathBuf {
    let group = safe_component(group_name);
    base.join(safe_component(cohort))
        .join(&group)
        .join(format!("{}_{}.png", group, index))
}

/// Write `bytes` to a sibling temp file, then move it over `path`.
///
/// A failed write never leaves a partial file at `path`.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "card".to_string());
    let tmp = path.with_file_name(format!(".{}.tmp", file_name));

    let result = fs::write(&tmp, bytes).and_then(|_| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    Ok(result?)
}
