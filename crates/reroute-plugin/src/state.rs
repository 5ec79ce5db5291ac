//! State shared by the browser and server plugin instances

use std::path::PathBuf;

use parking_lot::RwLock;
use reroute_config::{PluginOptions, ProjectLayout, ReactRouterConfig};
use reroute_manifest::{
    BrowserManifestPayload, ClientStats, RouteManifest, SerializeOptions, ServerBuildOptions,
    serialize_manifest,
};
use tracing::warn;

/// Everything the plugin hooks of one build need
///
/// The browser compile stores its [`ClientStats`] here so the server compile
/// can serialize the manifest with real asset URLs.
#[derive(Debug)]
pub struct RouterContext {
    pub config: ReactRouterConfig,
    pub options: PluginOptions,
    pub layout: ProjectLayout,
    pub manifest: RouteManifest,
    /// Entry server module, user file or generated template
    pub entry_server: PathBuf,
    pub serialize_options: SerializeOptions,
    client_stats: RwLock<Option<ClientStats>>,
}

impl RouterContext {
    pub fn new(
        config: ReactRouterConfig,
        options: PluginOptions,
        layout: ProjectLayout,
        manifest: RouteManifest,
        entry_server: PathBuf,
    ) -> Self {
        Self {
            config,
            options,
            layout,
            manifest,
            entry_server,
            serialize_options: SerializeOptions::default(),
            client_stats: RwLock::new(None),
        }
    }

    pub fn client_stats(&self) -> Option<ClientStats> {
        self.client_stats.read().clone()
    }

    pub fn set_client_stats(&self, stats: ClientStats) {
        *self.client_stats.write() = Some(stats);
    }

    /// Manifest payload with the given stats, or the stored ones
    pub async fn manifest_payload(&self, stats: Option<&ClientStats>) -> BrowserManifestPayload {
        let stored;
        let stats = match stats {
            Some(stats) => Some(stats),
            None => {
                stored = self.client_stats();
                if stored.is_none() {
                    warn!("No browser stats captured yet, manifest assets will be empty");
                }
                stored.as_ref()
            }
        };

        serialize_manifest(
            &self.manifest,
            stats,
            &self.layout.app_directory,
            &self.serialize_options,
        )
        .await
    }

    pub fn server_build_options(&self) -> ServerBuildOptions {
        ServerBuildOptions {
            entry_server_path: self.entry_server.clone(),
            assets_build_directory: self.layout.assets_build_directory.clone(),
            basename: self.config.basename.clone(),
            app_directory: self.layout.app_directory.clone(),
            ssr: self.config.ssr,
            public_path: self.serialize_options.public_path.clone(),
            future: self.config.future.clone(),
            prerender: self.config.prerender.clone(),
            federation: self.options.federation,
        }
    }
}
