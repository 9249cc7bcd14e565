//! Path normalization helpers for graph-tracked files
//!
//! Tracked paths are stored as forward-slash strings exactly as authored.
//! Uniqueness comparisons are case-insensitive; the filesystem trees this
//! tool targets are case-preserving but case-insensitive.

use std::path::Path;

/// Normalize any path-like input to a forward-slash string.
///
/// Native `PathBuf`s appear only at I/O and watcher boundaries; inside the
/// graph every path uses forward slashes regardless of platform.
pub fn normalize(path: impl AsRef<Path>) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Case-insensitive path equality using Unicode lowercasing.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// The file name component of a normalized path, extension stripped.
///
/// A leading dot does not count as an extension separator, so `.gitignore`
/// stays whole.
pub fn file_stem(path: &str) -> &str {
    let name = path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    }
}

/// The extension of a normalized path, without the dot.
pub fn extension(path: &str) -> Option<&str> {
    let name = path.trim_end_matches('/').rsplit('/').next()?;
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => Some(&name[idx + 1..]),
        _ => None,
    }
}
