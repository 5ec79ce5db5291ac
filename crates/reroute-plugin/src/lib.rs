//! React Router file-based routes for Rolldown
//!
//! [`ReactRouterBuild`] runs the two compiles of an app: the browser bundle
//! (entry client, browser manifest, one chunk per route) and the server bundle
//! (server build and entry server). [`ReactRouterPlugin`] is the Rolldown
//! plugin behind both; it serves the `virtual/react-router/*` modules, rewrites
//! route modules for their environment, and patches the browser manifest once
//! the browser chunks are known.
//!
//! The crate emits `tracing` events only. Enable the `logging` feature for a
//! ready-made subscriber.

mod build;
mod environment;
mod error;
mod plugin;
mod state;
mod stats;
mod templates;

#[cfg(feature = "logging")]
pub mod logging;

pub use build::{BuildReport, EnvironmentOutput, Prepared, ReactRouterBuild};
pub use environment::Environment;
pub use error::{Error, Result};
pub use plugin::{LoadedModule, ReactRouterPlugin};
pub use state::RouterContext;
pub use stats::collect_client_stats;
pub use templates::{ENTRY_CLIENT_TEMPLATE, ENTRY_SERVER_TEMPLATE, Entries};

// Re-export the Rolldown plugin surface used by hosts and tests
pub use rolldown_plugin::{HookLoadArgs, HookResolveIdArgs, Plugin, PluginContext};
