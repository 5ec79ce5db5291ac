//! Route manifest and generated modules for React Router builds
//!
//! Given the route tree of an application this crate produces everything the
//! bundler plugin serves as virtual modules:
//!
//! - [`RouteManifestBuilder`] flattens the configured tree into a
//!   [`RouteManifest`] keyed by route id, under a synthetic `root` route
//! - [`analyze_route_file`] reports which lifecycle exports a route file has
//! - [`serialize_manifest`] joins the manifest with browser chunk assets into
//!   the payload the runtime reads
//! - [`generate_server_build`] emits the server build module, optionally with
//!   a lazily loaded entry server for federation
//! - [`generate_route_proxy`] emits the lazy stand-in for federated routes
//!
//! # Example
//!
//! ```rust
//! use reroute_manifest::{RouteNode, ServerBuildOptions, build_route_manifest, generate_server_build};
//!
//! let routes = [RouteNode::new("routes/home.tsx").index()];
//! let manifest = build_route_manifest("app", &routes)?;
//! assert_eq!(manifest.len(), 2);
//!
//! let code = generate_server_build(&manifest, &ServerBuildOptions::default())?;
//! assert!(code.contains("export const routes = {"));
//! # Ok::<(), reroute_manifest::ManifestError>(())
//! ```

mod analyzer;
mod builder;
pub mod constants;
mod error;
mod federation;
mod paths;
mod route;
mod serializer;
mod server_build;
mod with_props;

pub use analyzer::{RouteExports, analyze_route_file, analyze_source};
pub use builder::{RouteManifestBuilder, build_route_manifest};
pub use error::{ManifestError, Result};
pub use federation::{ProxyTarget, generate_route_proxy};
pub use paths::{combine_urls, create_route_id, relative_path, strip_file_extension, to_slash};
pub use route::{ManifestRoute, RouteManifest, RouteNode};
pub use serializer::{
    BrowserManifestPayload, ClientStats, EntryManifest, RouteManifestItem, SerializeOptions,
    browser_manifest_placeholder_module, replace_placeholder, serialize_manifest,
    server_manifest_module,
};
pub use server_build::{ServerBuildOptions, generate_server_build};
pub use with_props::with_props_module;
