//! Source text of the server build module
//!
//! The server build is the module the request handler imports: route modules,
//! the entry server, and the scalar build settings. Two shapes exist. The static
//! one imports the entry server eagerly. The federated one defers it behind a
//! memoized dynamic import so loading a remote does not evaluate its entry
//! server; route modules stay static imports in both.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::constants::{SERVER_MANIFEST_ID, route_module_id};
use crate::error::Result;
use crate::paths::to_slash;
use crate::route::RouteManifest;

/// Settings baked into the server build
#[derive(Debug, Clone)]
pub struct ServerBuildOptions {
    /// Module imported as the entry server
    pub entry_server_path: PathBuf,
    /// Browser output directory, relative to the project root
    pub assets_build_directory: String,
    pub basename: String,
    /// Directory route files are resolved against
    pub app_directory: PathBuf,
    pub ssr: bool,
    pub public_path: String,
    /// Free-form `future` flags object
    pub future: serde_json::Value,
    /// Paths to prerender
    pub prerender: Vec<String>,
    /// Defer the entry server import
    pub federation: bool,
}

impl Default for ServerBuildOptions {
    fn default() -> Self {
        Self {
            entry_server_path: PathBuf::from("app/entry.server.tsx"),
            assets_build_directory: "build/client".to_string(),
            basename: "/".to_string(),
            app_directory: PathBuf::from("app"),
            ssr: true,
            public_path: "/".to_string(),
            future: serde_json::Value::Object(serde_json::Map::new()),
            prerender: Vec::new(),
            federation: false,
        }
    }
}

/// Generate the server build module for `manifest`
///
/// # Errors
///
/// Fails only if a value cannot be encoded as JSON.
pub fn generate_server_build(manifest: &RouteManifest, options: &ServerBuildOptions) -> Result<String> {
    let mut out = String::new();
    let entry_server = js(&to_slash(&options.entry_server_path))?;

    if options.federation {
        write_lazy_entry_server(&mut out, &entry_server)?;
    } else {
        writeln!(out, "import * as entryServer from {entry_server};")?;
    }

    for (index, route) in manifest.values().enumerate() {
        let file = to_slash(&resolve(&options.app_directory, &route.file));
        writeln!(out, "import * as route{index} from {};", js(&route_module_id(&file))?)?;
    }

    writeln!(out)?;
    writeln!(out, "export {{ default as assets }} from {};", js(SERVER_MANIFEST_ID)?)?;
    writeln!(
        out,
        "export const assetsBuildDirectory = {};",
        js(&options.assets_build_directory)?
    )?;
    writeln!(out, "export const basename = {};", js(&options.basename)?)?;
    writeln!(out, "export const future = {};", js(&options.future)?)?;
    writeln!(out, "export const isSpaMode = {};", !options.ssr)?;
    writeln!(out, "export const ssr = {};", options.ssr)?;
    writeln!(out, "export const publicPath = {};", js(&options.public_path)?)?;
    writeln!(out, "export const prerender = {};", js(&options.prerender)?)?;
    writeln!(out, "export const entry = {{ module: entryServer }};")?;

    writeln!(out, "export const routes = {{")?;
    for (index, (key, route)) in manifest.iter().enumerate() {
        writeln!(out, "  {}: {{", js(key)?)?;
        writeln!(out, "    id: {},", js(&route.id)?)?;
        writeln!(out, "    parentId: {},", js_opt(route.parent_id.as_ref())?)?;
        writeln!(out, "    path: {},", js_opt(route.path.as_ref())?)?;
        writeln!(out, "    index: {},", js_opt(route.index.as_ref())?)?;
        writeln!(out, "    caseSensitive: {},", js_opt(route.case_sensitive.as_ref())?)?;
        writeln!(out, "    module: route{index}")?;
        writeln!(out, "  }},")?;
    }
    writeln!(out, "}};")?;

    Ok(out)
}

fn write_lazy_entry_server(out: &mut String, entry_server: &str) -> Result<()> {
    write!(
        out,
        r#"let entryServerModule;
let entryServerPromise;

const ensureEntryServerLoaded = () => {{
  if (entryServerModule) {{
    return Promise.resolve(entryServerModule);
  }}
  if (!entryServerPromise) {{
    entryServerPromise = import({entry_server}).then((module) => {{
      entryServerModule = module;
      return module;
    }});
  }}
  return entryServerPromise;
}};

const entryServerHooks = new Set(["handleRequest", "handleDataRequest", "default"]);

const entryServer = new Proxy({{}}, {{
  get(_target, prop) {{
    if (entryServerHooks.has(prop)) {{
      return async (...args) => {{
        const module = await ensureEntryServerLoaded();
        const handler = module[prop];
        return typeof handler === "function" ? handler(...args) : handler;
      }};
    }}
    // Optional exports such as handleError read as absent until a hook has loaded the module.
    return entryServerModule ? entryServerModule[prop] : undefined;
  }},
}});

"#
    )?;
    Ok(())
}

fn resolve(base: &Path, file: &str) -> PathBuf {
    use path_clean::PathClean;
    base.join(file).clean()
}

/// JavaScript literal for a JSON-encodable value
fn js<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Like [`js`], with `undefined` for a missing value
fn js_opt<T: Serialize>(value: Option<&T>) -> Result<String> {
    match value {
        Some(value) => js(value),
        None => Ok("undefined".to_string()),
    }
}
