//! Project and plugin configuration

use std::path::{Path, PathBuf};

use reroute_manifest::{relative_path, to_slash};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Settings of a React Router project
///
/// Every field has a default, so an empty config file (or none at all) is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReactRouterConfig {
    /// Directory holding `root.tsx`, the entries and the route config
    pub app_directory: PathBuf,
    /// Router basename
    pub basename: String,
    /// Output root; browser and server builds go below it
    pub build_directory: PathBuf,
    /// Server rendering; `false` builds in SPA mode
    pub ssr: bool,
    /// Free-form future flags, passed through to the server build
    pub future: Value,
    /// Paths to prerender
    pub prerender: Vec<String>,
}

impl Default for ReactRouterConfig {
    fn default() -> Self {
        Self {
            app_directory: PathBuf::from("app"),
            basename: "/".to_string(),
            build_directory: PathBuf::from("build"),
            ssr: true,
            future: Value::Object(serde_json::Map::new()),
            prerender: Vec::new(),
        }
    }
}

impl ReactRouterConfig {
    /// Resolve the configured directories against the project `root`
    pub fn layout(&self, root: &Path) -> ProjectLayout {
        let app_directory = root.join(&self.app_directory);
        let build_directory = root.join(&self.build_directory);
        let client_build_directory = build_directory.join("client");
        let server_build_directory = build_directory.join("server");
        let assets_build_directory = to_slash(&relative_path(root, &client_build_directory));

        ProjectLayout {
            root: root.to_path_buf(),
            app_directory,
            build_directory,
            client_build_directory,
            server_build_directory,
            assets_build_directory,
        }
    }
}

/// Absolute directories derived from a [`ReactRouterConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub app_directory: PathBuf,
    pub build_directory: PathBuf,
    pub client_build_directory: PathBuf,
    pub server_build_directory: PathBuf,
    /// Client build directory relative to `root`, with forward slashes
    pub assets_build_directory: String,
}

impl ProjectLayout {
    /// Cache directory for generated entry files
    pub fn cache_directory(&self) -> PathBuf {
        self.build_directory.join(".react-router")
    }
}

/// Module format of the server bundle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerOutput {
    #[default]
    Module,
    Commonjs,
}

impl ServerOutput {
    /// Value of the `type` field in the emitted server `package.json`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Commonjs => "commonjs",
        }
    }
}

/// Options of the bundler plugin itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginOptions {
    pub server_output: ServerOutput,
    /// Defer the entry server import and proxy federated routes lazily
    pub federation: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_react_router() {
        let config = ReactRouterConfig::default();
        assert_eq!(config.app_directory, PathBuf::from("app"));
        assert_eq!(config.basename, "/");
        assert!(config.ssr);
        assert_eq!(config.future, serde_json::json!({}));
        assert!(config.prerender.is_empty());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: ReactRouterConfig =
            serde_json::from_value(serde_json::json!({ "ssr": false, "appDirectory": "src" }))
                .unwrap();
        assert!(!config.ssr);
        assert_eq!(config.app_directory, PathBuf::from("src"));
        assert_eq!(config.build_directory, PathBuf::from("build"));
    }

    #[test]
    fn layout_derives_build_directories() {
        let layout = ReactRouterConfig::default().layout(Path::new("/project"));
        assert_eq!(layout.app_directory, PathBuf::from("/project/app"));
        assert_eq!(layout.client_build_directory, PathBuf::from("/project/build/client"));
        assert_eq!(layout.server_build_directory, PathBuf::from("/project/build/server"));
        assert_eq!(layout.assets_build_directory, "build/client");
    }

    #[test]
    fn server_output_parses_lowercase() {
        let options: PluginOptions =
            serde_json::from_value(serde_json::json!({ "serverOutput": "commonjs" })).unwrap();
        assert_eq!(options.server_output, ServerOutput::Commonjs);
        assert_eq!(options.server_output.as_str(), "commonjs");
        assert!(!options.federation);
    }
}
