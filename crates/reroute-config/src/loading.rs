use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use tracing::{debug, warn};

use crate::config::ReactRouterConfig;
use crate::error::{ConfigError, Result};

/// Config file names, lowest precedence first
pub const CONFIG_FILES: &[&str] = &["react-router.config.toml", "react-router.config.json"];

/// Prefix of environment overrides (`REACT_ROUTER_APP_DIRECTORY`, ...)
pub const ENV_PREFIX: &str = "REACT_ROUTER_";

impl ReactRouterConfig {
    /// Load the configuration of the project at `root`
    ///
    /// Priority: environment variables > JSON file > TOML file > defaults
    pub fn load(root: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let files: Vec<PathBuf> = CONFIG_FILES
            .iter()
            .map(|name| root.join(name))
            .filter(|path| path.exists())
            .collect();

        if files.is_empty() {
            warn!(root = %root.display(), "No react-router config file found, using defaults");
        }

        for path in files {
            debug!(file = %path.display(), "Loading config file");
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => figment.merge(Toml::file(path)),
                _ => figment.merge(Json::file(path)),
            };
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .map(|key| camel_case(key.as_str()).into())
                .lowercase(false),
        );

        figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            hint: Some(e.to_string()),
        })
    }
}

/// `APP_DIRECTORY` -> `appDirectory`
fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}
