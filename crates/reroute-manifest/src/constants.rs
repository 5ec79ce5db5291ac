//! Module ids, chunk names and resource queries shared by the build

/// Id of the application shell route
pub const ROOT_ROUTE_ID: &str = "root";

/// Default file of the application shell route, relative to the app directory
pub const ROOT_ROUTE_FILE: &str = "root.tsx";

/// Resource query marking a route module for the route transforms
pub const ROUTE_QUERY: &str = "react-router-route";

/// Resource query marking a route module for the federated lazy proxy
pub const ROUTE_FEDERATION_QUERY: &str = "react-router-route-federation";

/// Virtual module holding the browser manifest assignment
pub const BROWSER_MANIFEST_ID: &str = "virtual/react-router/browser-manifest";

/// Virtual module exporting the manifest to the server build
pub const SERVER_MANIFEST_ID: &str = "virtual/react-router/server-manifest";

/// Virtual module with the generated server build
pub const SERVER_BUILD_ID: &str = "virtual/react-router/server-build";

/// Virtual module with the component props wrappers
pub const WITH_PROPS_ID: &str = reroute_gen::WITH_PROPS_MODULE;

/// Chunk name of the browser entry
pub const ENTRY_CLIENT_CHUNK: &str = "entry.client";

/// Chunk name of the server entry
pub const ENTRY_SERVER_CHUNK: &str = "entry.server";

/// Chunk name of the server build entry
pub const SERVER_APP_CHUNK: &str = "app";

/// Global the browser manifest is assigned to
pub const MANIFEST_GLOBAL: &str = "__reactRouterManifest";

/// Placeholder literal replaced with the manifest once browser stats exist
pub const MANIFEST_PLACEHOLDER: &str = "PLACEHOLDER";

/// Manifest URL used when the browser manifest chunk is unknown
pub const DEFAULT_MANIFEST_URL: &str = "/static/js/virtual/react-router/browser-manifest.js";

/// Extensions tried, in order, when looking up entry and route files
pub const JS_EXTENSIONS: &[&str] = &[".tsx", ".ts", ".jsx", ".js", ".mjs"];

/// `<file>?react-router-route`
pub fn route_module_id(file: &str) -> String {
    format!("{file}?{ROUTE_QUERY}")
}

/// Underlying file of a module id tagged with `query`, if it carries it
pub fn strip_route_query<'a>(id: &'a str, query: &str) -> Option<&'a str> {
    let (file, found) = id.split_once('?')?;
    (found == query).then_some(file)
}
