//! Path and URL helpers

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

/// Join a base URL and a relative URL with exactly one slash between them
///
/// An empty relative part returns the base unchanged.
pub fn combine_urls(base: &str, relative: &str) -> String {
    if relative.is_empty() {
        return base.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        relative.trim_start_matches('/')
    )
}

/// Drop the final extension of a file path (`routes/home.tsx` -> `routes/home`)
pub fn strip_file_extension(file: &str) -> &str {
    match file.rfind('.') {
        Some(dot) if dot + 1 < file.len() && !file[dot + 1..].contains(['/', '\\']) => &file[..dot],
        _ => file,
    }
}

/// Route id derived from a route file path
pub fn create_route_id(file: &str) -> String {
    to_slash(&Path::new(strip_file_extension(file)).clean())
}

/// Render a path with forward slashes
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// `path` relative to `base`, walking up with `..` where needed
///
/// Both paths are cleaned first. Paths on different roots yield `path` itself.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    let base = base.clean();
    let path = path.clean();

    let base_components: Vec<Component<'_>> = base.components().collect();
    let path_components: Vec<Component<'_>> = path.components().collect();

    if base_components.first() != path_components.first() && base.is_absolute() {
        return path;
    }

    let common = base_components
        .iter()
        .zip(&path_components)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for component in &base_components[common..] {
        if !matches!(component, Component::CurDir) {
            relative.push("..");
        }
    }
    for component in &path_components[common..] {
        relative.push(component.as_os_str());
    }
    relative
}
