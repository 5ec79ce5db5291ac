//! Route config file discovery and parsing
//!
//! `routes.json` holds a JSON array of route nodes. `routes.toml` holds the
//! same nodes as `[[routes]]` tables.

use std::path::{Path, PathBuf};

use reroute_manifest::RouteNode;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

/// Route config file names, in lookup order
pub const ROUTE_CONFIG_FILES: &[&str] = &["routes.json", "routes.toml"];

#[derive(Deserialize)]
struct TomlRoutes {
    #[serde(default)]
    routes: Vec<RouteNode>,
}

/// First route config file that exists in `app_directory`
pub fn find_route_config(app_directory: &Path) -> Option<PathBuf> {
    ROUTE_CONFIG_FILES
        .iter()
        .map(|name| app_directory.join(name))
        .find(|path| path.is_file())
}

/// Load the route tree of the app at `app_directory`
///
/// A missing route config logs a warning and yields an empty tree, leaving
/// only the root route.
///
/// # Errors
///
/// Returns [`ConfigError::RoutesFile`] when the file cannot be read or parsed.
pub async fn load_route_config(app_directory: &Path) -> Result<Vec<RouteNode>> {
    let Some(path) = find_route_config(app_directory) else {
        warn!(
            app_directory = %app_directory.display(),
            "No route config found, only the root route will be built"
        );
        return Ok(Vec::new());
    };

    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| routes_error(&path, e))?;
    let routes = parse_route_config(&path, &content)?;
    debug!(file = %path.display(), routes = routes.len(), "Loaded route config");
    Ok(routes)
}

/// Parse route config text; the extension of `path` selects the format
pub fn parse_route_config(path: &Path, content: &str) -> Result<Vec<RouteNode>> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str::<TomlRoutes>(content)
            .map(|file| file.routes)
            .map_err(|e| routes_error(path, e)),
        _ => serde_json::from_str(content).map_err(|e| routes_error(path, e)),
    }
}

fn routes_error(path: &Path, reason: impl ToString) -> ConfigError {
    ConfigError::RoutesFile {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_tree() {
        let routes = parse_route_config(
            Path::new("app/routes.json"),
            r#"[
                { "file": "routes/home.tsx", "index": true },
                { "file": "routes/blog.tsx", "path": "blog", "children": [
                    { "id": "post", "file": "routes/post.tsx", "path": ":slug", "caseSensitive": true }
                ] }
            ]"#,
        )
        .unwrap();

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0], RouteNode::new("routes/home.tsx").index());
        assert_eq!(
            routes[1].children[0],
            RouteNode::new("routes/post.tsx")
                .with_id("post")
                .with_path(":slug")
                .case_sensitive()
        );
    }

    #[test]
    fn parses_toml_tables() {
        let routes = parse_route_config(
            Path::new("app/routes.toml"),
            r#"
[[routes]]
file = "routes/home.tsx"
index = true

[[routes]]
file = "routes/about.tsx"
path = "about"
"#,
        )
        .unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[1].path.as_deref(), Some("about"));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let err = parse_route_config(Path::new("app/routes.json"), r#"[{ "path": "x" }]"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::RoutesFile { .. }));
        assert!(err.to_string().contains("routes.json"));
    }
}
