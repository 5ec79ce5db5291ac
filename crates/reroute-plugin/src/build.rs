//! Browser and server compiles of a React Router app
//!
//! The browser compile runs first: it produces the stats the server manifest
//! is built from. Each compile gets a fresh Rolldown bundler; the plugin
//! instances share one [`RouterContext`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use reroute_config::{PluginOptions, ReactRouterConfig, existing_entry_file, load_route_config};
use reroute_manifest::RouteManifestBuilder;
use reroute_manifest::constants::{
    BROWSER_MANIFEST_ID, ENTRY_CLIENT_CHUNK, ENTRY_SERVER_CHUNK, SERVER_APP_CHUNK, SERVER_BUILD_ID,
    route_module_id,
};
use rolldown::{BundlerBuilder, BundlerOptions, InputItem, IsExternal};
use rolldown_common::Output;
use rolldown_plugin::__inner::SharedPluginable;
use tracing::{debug, info};

use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::plugin::ReactRouterPlugin;
use crate::state::RouterContext;
use crate::templates::Entries;

/// Packages left to the server runtime
const SERVER_EXTERNALS: &[&str] = &["express"];

/// Files written by one compile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentOutput {
    pub directory: PathBuf,
    /// File names relative to `directory`
    pub files: Vec<String>,
}

/// Outcome of [`ReactRouterBuild::build`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub client: EnvironmentOutput,
    pub server: EnvironmentOutput,
    /// Number of routes in the manifest, root included
    pub routes: usize,
}

/// Two-environment build of the project at `root`
///
/// # Example
///
/// ```rust,no_run
/// use reroute_config::{PluginOptions, ReactRouterConfig};
/// use reroute_plugin::ReactRouterBuild;
///
/// # async fn run() -> reroute_plugin::Result<()> {
/// let root = std::path::Path::new(".");
/// let config = ReactRouterConfig::load(root)?;
/// let report = ReactRouterBuild::new(root, config, PluginOptions::default())
///     .build()
///     .await?;
/// println!("{} client files", report.client.files.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReactRouterBuild {
    root: PathBuf,
    config: ReactRouterConfig,
    options: PluginOptions,
}

impl ReactRouterBuild {
    pub fn new(root: impl AsRef<Path>, config: ReactRouterConfig, options: PluginOptions) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config,
            options,
        }
    }

    /// Build the shared context: route manifest and entry modules
    pub async fn prepare(&self) -> Result<Prepared> {
        let layout = self.config.layout(&self.root);
        let routes = load_route_config(&layout.app_directory).await?;
        let root_base = layout.app_directory.join("root");
        let root_file = existing_entry_file(&root_base).ok_or(Error::MissingEntry(root_base))?;
        let manifest = RouteManifestBuilder::new(&layout.app_directory)
            .with_root_file(&root_file)
            .build(&routes)?;
        let entries = Entries::resolve(&layout).await?;

        debug!(routes = manifest.len(), entry_client = %entries.client.display(), "Prepared build");

        let context = Arc::new(RouterContext::new(
            self.config.clone(),
            self.options.clone(),
            layout,
            manifest,
            entries.server.clone(),
        ));
        Ok(Prepared { context, entries })
    }

    /// Run the browser compile, then the server compile
    pub async fn build(&self) -> Result<BuildReport> {
        let prepared = self.prepare().await?;
        let context = &prepared.context;

        let client = self
            .compile(Environment::Browser, prepared.browser_inputs(), context)
            .await?;
        let server = self
            .compile(Environment::Server, prepared.server_inputs(), context)
            .await?;

        info!(
            routes = context.manifest.len(),
            client_files = client.files.len(),
            server_files = server.files.len(),
            "React Router build complete"
        );

        Ok(BuildReport {
            client,
            server,
            routes: context.manifest.len(),
        })
    }

    async fn compile(
        &self,
        environment: Environment,
        input: Vec<InputItem>,
        context: &Arc<RouterContext>,
    ) -> Result<EnvironmentOutput> {
        let directory = match environment {
            Environment::Browser => context.layout.client_build_directory.clone(),
            Environment::Server => context.layout.server_build_directory.clone(),
        };

        let mut options = BundlerOptions {
            input: Some(input),
            cwd: Some(self.root.clone()),
            dir: Some(directory.to_string_lossy().into_owned()),
            platform: Some(environment.platform()),
            format: Some(environment.output_format(context.options.server_output)),
            entry_filenames: Some("static/js/[name].js".to_string().into()),
            ..Default::default()
        };
        match environment {
            Environment::Browser => {
                options.chunk_filenames = Some("static/js/async/[name]-[hash].js".to_string().into());
                options.css_entry_filenames = Some("static/css/[name].css".to_string().into());
                options.css_chunk_filenames =
                    Some("static/css/async/[name]-[hash].css".to_string().into());
            }
            Environment::Server => {
                options.external = Some(IsExternal::from(
                    SERVER_EXTERNALS
                        .iter()
                        .map(|name| (*name).to_string())
                        .collect::<Vec<_>>(),
                ));
            }
        }

        let plugin: SharedPluginable =
            Arc::new(ReactRouterPlugin::new(Arc::clone(context), environment));

        let mut bundler = BundlerBuilder::default()
            .with_options(options)
            .with_plugins(vec![plugin])
            .build()
            .map_err(|e| Error::from_rolldown_batch(&e))?;

        let output = bundler
            .write()
            .await
            .map_err(|e| Error::from_rolldown_batch(&e))?;

        let files = output
            .assets
            .iter()
            .map(|output| match output {
                Output::Chunk(chunk) => chunk.filename.to_string(),
                Output::Asset(asset) => asset.filename.to_string(),
            })
            .collect();

        debug!(env = %environment, dir = %directory.display(), "Compile finished");
        Ok(EnvironmentOutput { directory, files })
    }
}

/// Shared context and entry modules, ready for the compiles
#[derive(Debug, Clone)]
pub struct Prepared {
    pub context: Arc<RouterContext>,
    pub entries: Entries,
}

impl Prepared {
    /// `entry.client`, the browser manifest, and one input per route keyed by route id
    pub fn browser_inputs(&self) -> Vec<InputItem> {
        let mut inputs = vec![
            input(ENTRY_CLIENT_CHUNK, self.entries.client.to_string_lossy()),
            input(BROWSER_MANIFEST_ID, BROWSER_MANIFEST_ID),
        ];
        let app_directory = &self.context.layout.app_directory;
        inputs.extend(self.context.manifest.values().map(|route| {
            let file = reroute_manifest::to_slash(&app_directory.join(&route.file));
            input(&route.id, route_module_id(&file))
        }));
        inputs
    }

    /// `app` (custom server app or the server build) and `entry.server`
    pub fn server_inputs(&self) -> Vec<InputItem> {
        let app = match &self.entries.server_app {
            Some(path) => path.to_string_lossy().into_owned(),
            None => SERVER_BUILD_ID.to_string(),
        };
        vec![
            input(SERVER_APP_CHUNK, app),
            input(ENTRY_SERVER_CHUNK, self.entries.server.to_string_lossy()),
        ]
    }
}

fn input(name: &str, import: impl Into<String>) -> InputItem {
    InputItem {
        name: Some(name.to_string()),
        import: import.into(),
    }
}
