//! Route module rewriting on the OXC AST
//!
//! This crate holds the source-level half of the route pipeline:
//!
//! - [`remove_exports`] strips exports (server-only ones for the browser) and
//!   cleans up the bindings only they used
//! - [`transform_route`] wraps the default export and the named component
//!   exports in the props wrappers from `virtual/react-router/with-props`
//! - [`export_names`] reports the export surface of a module without running it
//!
//! # Example
//!
//! ```rust
//! use reroute_gen::{RouteTarget, transform_route_module};
//!
//! let source = r#"
//!     export const loader = () => fetch("/api");
//!     export default function Page() { return null; }
//! "#;
//!
//! let output = transform_route_module(source, "app/routes/page.tsx", RouteTarget::Browser)?;
//! assert!(!output.code.contains("loader"));
//! assert!(output.code.contains("_withComponentProps(function Page()"));
//! # Ok::<(), reroute_gen::GenError>(())
//! ```

mod codegen;
mod component_props;
mod dead_code;
mod default_export;
mod error;
mod exports;
mod names;
mod parser;
mod remove_exports;
mod transform;
mod uid;

pub use codegen::{GeneratedCode, generate};
pub use component_props::transform_route;
pub use dead_code::{eliminate_dead_code, referenced_bindings};
pub use default_export::normalize_default_export;
pub use error::{GenError, Result};
pub use exports::{binding_names, export_names, module_export_name};
pub use names::{
    CLIENT_ROUTE_EXPORTS, COMPONENT_WRAPPER, MANIFEST_FLAG_EXPORTS, NAMED_COMPONENT_EXPORTS,
    SERVER_ONLY_ROUTE_EXPORTS, WITH_PROPS_MODULE, named_component_wrapper,
};
pub use parser::{ParseDiagnostic, ParseOptions, ParsedProgram, parse, strip_query};
pub use remove_exports::remove_exports;
pub use transform::{
    NormalizeDefaultExport, RemoveExports, RouteTarget, TransformEngine, TransformOutput,
    TransformPass, WrapComponentProps, transform_route_module,
    transform_route_module_with_map,
};
pub use uid::UidGenerator;

// Re-export commonly used OXC types for convenience
pub use oxc_allocator::Allocator;

/// Export names of `source`, parsed according to the extension of `id`
///
/// # Errors
///
/// Returns [`GenError::Parse`] on syntax errors.
pub fn module_exports(source: &str, id: &str) -> Result<Vec<String>> {
    let allocator = Allocator::default();
    let parsed = parse(&allocator, source, ParseOptions::from_path(id))?;
    Ok(export_names(&parsed.program))
}
