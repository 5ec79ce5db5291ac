//! Built-in entry modules used when the app does not provide its own

use std::path::{Path, PathBuf};

use reroute_config::{ProjectLayout, existing_entry_file};
use tracing::debug;

use crate::error::Result;

pub const ENTRY_CLIENT_TEMPLATE: &str = include_str!("../templates/entry.client.tsx");
pub const ENTRY_SERVER_TEMPLATE: &str = include_str!("../templates/entry.server.tsx");

/// Entry modules of one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entries {
    pub client: PathBuf,
    pub server: PathBuf,
    /// `<app>/../server/app.*`, when the project has one
    pub server_app: Option<PathBuf>,
}

impl Entries {
    /// Find the app's entries, writing templates for the missing ones
    pub async fn resolve(layout: &ProjectLayout) -> Result<Self> {
        let client = resolve_entry(layout, "entry.client", ENTRY_CLIENT_TEMPLATE).await?;
        let server = resolve_entry(layout, "entry.server", ENTRY_SERVER_TEMPLATE).await?;
        let server_app = layout
            .app_directory
            .parent()
            .and_then(|parent| existing_entry_file(&parent.join("server").join("app")));

        Ok(Self {
            client,
            server,
            server_app,
        })
    }
}

async fn resolve_entry(layout: &ProjectLayout, name: &str, template: &str) -> Result<PathBuf> {
    if let Some(path) = existing_entry_file(&layout.app_directory.join(name)) {
        return Ok(path);
    }

    let path = layout.cache_directory().join(format!("{name}.tsx"));
    write_template(&path, template).await?;
    debug!(entry = name, file = %path.display(), "Using built-in entry");
    Ok(path)
}

async fn write_template(path: &Path, template: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, template).await?;
    Ok(())
}
