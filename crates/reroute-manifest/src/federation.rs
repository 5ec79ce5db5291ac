//! Lazy proxies for federated route modules
//!
//! A module id tagged `?react-router-route-federation` loads a stand-in that
//! re-exports the real route module (`?react-router-route`) through a dynamic
//! import. On the server each export becomes an async function that loads the
//! route on first call. In the browser the route is awaited at the top level
//! and its bindings re-exported.

use std::fmt::Write as _;

use crate::constants::route_module_id;
use crate::error::Result;

/// Which runtime the proxy is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyTarget {
    Browser,
    Server,
}

/// Generate the proxy module for the route at `file`
///
/// `exports` are the export names of the transformed route module. Names that
/// are not plain identifiers are skipped.
pub fn generate_route_proxy(file: &str, exports: &[String], target: ProxyTarget) -> Result<String> {
    let specifier = serde_json::to_string(&route_module_id(file))?;
    let exports: Vec<&str> = exports
        .iter()
        .map(String::as_str)
        .filter(|name| *name == "default" || is_identifier(name))
        .collect();

    let mut out = String::new();
    match target {
        ProxyTarget::Server => {
            writeln!(out, "let routeModule;")?;
            writeln!(out, "const loadRoute = async (exportName) => {{")?;
            writeln!(out, "  if (routeModule === undefined) {{")?;
            writeln!(out, "    routeModule = await import({specifier});")?;
            writeln!(out, "  }}")?;
            writeln!(out, "  return routeModule[exportName];")?;
            writeln!(out, "}};")?;
            for name in &exports {
                let call = format!(
                    "(...args) => loadRoute({}).then((value) => typeof value === \"function\" ? value(...args) : value)",
                    serde_json::to_string(name)?
                );
                if *name == "default" {
                    writeln!(out, "export default {call};")?;
                } else {
                    writeln!(out, "export const {name} = {call};")?;
                }
            }
        }
        ProxyTarget::Browser => {
            writeln!(out, "const routeModule = await import({specifier});")?;
            if !exports.is_empty() {
                let bindings: Vec<String> = exports
                    .iter()
                    .map(|name| {
                        if *name == "default" {
                            "default: defaultExport".to_string()
                        } else {
                            (*name).to_string()
                        }
                    })
                    .collect();
                let reexports: Vec<String> = exports
                    .iter()
                    .map(|name| {
                        if *name == "default" {
                            "defaultExport as default".to_string()
                        } else {
                            (*name).to_string()
                        }
                    })
                    .collect();
                writeln!(out, "const {{ {} }} = routeModule;", bindings.join(", "))?;
                writeln!(out, "export {{ {} }};", reexports.join(", "))?;
            }
        }
    }

    Ok(out)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
