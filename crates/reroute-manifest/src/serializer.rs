//! Browser/server manifest payload
//!
//! The payload combines the route manifest with the browser compile's chunk
//! assets and the per-route export flags. It reaches the runtime two ways: as
//! the default export of the server manifest module, and by patching the
//! placeholder the browser manifest chunk was compiled with.

use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analyzer::analyze_route_file;
use crate::constants::{
    BROWSER_MANIFEST_ID, DEFAULT_MANIFEST_URL, ENTRY_CLIENT_CHUNK, MANIFEST_GLOBAL,
    MANIFEST_PLACEHOLDER,
};
use crate::error::Result;
use crate::paths::combine_urls;
use crate::route::RouteManifest;

/// Assets emitted by the browser compile, grouped by chunk name
///
/// Each list starts with the chunk's own file, followed by the chunks it
/// statically imports and its stylesheets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientStats {
    pub assets_by_chunk_name: IndexMap<String, Vec<String>>,
}

impl ClientStats {
    /// `(js, css)` assets of a chunk; empty when the chunk is unknown
    pub fn assets(&self, chunk_name: &str) -> (Vec<&str>, Vec<&str>) {
        let assets = self
            .assets_by_chunk_name
            .get(chunk_name)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let js = assets
            .iter()
            .filter(|asset| asset.ends_with(".js"))
            .map(String::as_str)
            .collect();
        let css = assets
            .iter()
            .filter(|asset| asset.ends_with(".css"))
            .map(String::as_str)
            .collect();
        (js, css)
    }
}

/// Assets of the application shell entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryManifest {
    pub module: String,
    pub imports: Vec<String>,
    pub css: Vec<String>,
}

/// Manifest entry for one route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteManifestItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
    /// Primary browser chunk, empty when the route produced none
    pub module: String,
    pub has_action: bool,
    pub has_loader: bool,
    pub has_client_action: bool,
    pub has_client_loader: bool,
    pub has_error_boundary: bool,
    pub imports: Vec<String>,
    pub css: Vec<String>,
}

/// The manifest handed to the routing runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserManifestPayload {
    /// Changes on every serialization
    pub version: String,
    pub url: String,
    pub entry: EntryManifest,
    pub routes: IndexMap<String, RouteManifestItem>,
}

impl BrowserManifestPayload {
    /// JSON text of the payload
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Knobs for [`serialize_manifest`]
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Public base every asset URL is joined onto
    pub public_path: String,
    /// Chunk name of the application shell entry
    pub entry_chunk: String,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            public_path: "/".to_string(),
            entry_chunk: ENTRY_CLIENT_CHUNK.to_string(),
        }
    }
}

/// Build the manifest payload
///
/// Without `stats` every route still appears, with an empty `module` and empty
/// asset lists. Each route file is analyzed from `app_directory` for the
/// lifecycle flags.
pub async fn serialize_manifest(
    manifest: &RouteManifest,
    stats: Option<&ClientStats>,
    app_directory: &Path,
    options: &SerializeOptions,
) -> BrowserManifestPayload {
    let empty = ClientStats::default();
    let stats = stats.unwrap_or(&empty);
    let url = |asset: &str| combine_urls(&options.public_path, asset);

    let mut routes = IndexMap::with_capacity(manifest.len());
    for (key, route) in manifest {
        let (js, css) = stats.assets(&route.id);
        let exports = analyze_route_file(&app_directory.join(&route.file)).await;

        routes.insert(
            key.clone(),
            RouteManifestItem {
                id: route.id.clone(),
                parent_id: route.parent_id.clone(),
                path: route.path.clone(),
                index: route.index,
                case_sensitive: route.case_sensitive,
                module: js.first().map(|asset| url(asset)).unwrap_or_default(),
                has_action: exports.has_action(),
                has_loader: exports.has_loader(),
                has_client_action: exports.has_client_action(),
                has_client_loader: exports.has_client_loader(),
                has_error_boundary: exports.has_error_boundary(),
                imports: js.iter().map(|asset| url(asset)).collect(),
                css: css.iter().map(|asset| url(asset)).collect(),
            },
        );
    }

    let (entry_js, entry_css) = stats.assets(&options.entry_chunk);
    let manifest_url = stats
        .assets(BROWSER_MANIFEST_ID)
        .0
        .first()
        .map_or_else(|| DEFAULT_MANIFEST_URL.to_string(), |asset| url(asset));

    BrowserManifestPayload {
        version: uuid::Uuid::new_v4().to_string(),
        url: manifest_url,
        entry: EntryManifest {
            module: entry_js.first().map(|asset| url(asset)).unwrap_or_default(),
            imports: entry_js.iter().map(|asset| url(asset)).collect(),
            css: entry_css.iter().map(|asset| url(asset)).collect(),
        },
        routes,
    }
}

/// Source of the browser manifest module before stats exist
pub fn browser_manifest_placeholder_module() -> String {
    format!("window.{MANIFEST_GLOBAL} = \"{MANIFEST_PLACEHOLDER}\";\n")
}

/// Source of the server manifest module
pub fn server_manifest_module(payload: &BrowserManifestPayload) -> Result<String> {
    Ok(format!("export default {};\n", payload.to_json()?))
}

static PLACEHOLDER_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    let placeholder = regex::escape(MANIFEST_PLACEHOLDER);
    Regex::new(&format!("[\"'`]{placeholder}[\"'`]")).expect("placeholder pattern is a valid regex")
});

/// Replace the placeholder literal in emitted browser code with the payload
///
/// Returns `None` when `code` holds no placeholder.
pub fn replace_placeholder(code: &str, payload: &BrowserManifestPayload) -> Result<Option<String>> {
    if !PLACEHOLDER_LITERAL.is_match(code) {
        return Ok(None);
    }
    let json = payload.to_json()?;
    Ok(Some(
        PLACEHOLDER_LITERAL
            .replace(code, regex::NoExpand(&json))
            .into_owned(),
    ))
}
