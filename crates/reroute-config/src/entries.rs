//! Entry file lookup

use std::path::{Path, PathBuf};

use reroute_manifest::constants::JS_EXTENSIONS;

/// First existing `base` + extension, trying [`JS_EXTENSIONS`] in order
///
/// Falls back to `base.tsx` when none exists.
pub fn find_entry_file(base: &Path) -> PathBuf {
    existing_entry_file(base).unwrap_or_else(|| with_extension(base, JS_EXTENSIONS[0]))
}

/// Like [`find_entry_file`], without the fallback
pub fn existing_entry_file(base: &Path) -> Option<PathBuf> {
    JS_EXTENSIONS
        .iter()
        .map(|ext| with_extension(base, ext))
        .find(|path| path.is_file())
}

// Appends rather than replaces, so `entry.client` keeps its inner dot.
fn with_extension(base: &Path, ext: &str) -> PathBuf {
    let mut path = base.as_os_str().to_owned();
    path.push(ext);
    PathBuf::from(path)
}
