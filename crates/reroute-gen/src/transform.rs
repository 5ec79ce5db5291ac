//! Pass pipeline for route modules

use std::path::Path;

use oxc_allocator::Allocator;

use crate::codegen::generate;
use crate::component_props::transform_route;
use crate::default_export::normalize_default_export;
use crate::error::Result;
use crate::names::SERVER_ONLY_ROUTE_EXPORTS;
use crate::parser::{ParseOptions, ParsedProgram, parse, strip_query};
use crate::remove_exports::remove_exports;

/// One rewrite applied to a parsed route module
pub trait TransformPass {
    fn name(&self) -> &'static str;

    /// Rewrite `program` in place, returning whether anything changed
    fn run(&self, program: &mut ParsedProgram) -> Result<bool>;
}

/// Turns `export { App as default }` into `export default App`
pub struct NormalizeDefaultExport;

impl TransformPass for NormalizeDefaultExport {
    fn name(&self) -> &'static str {
        "normalize-default-export"
    }

    fn run(&self, program: &mut ParsedProgram) -> Result<bool> {
        normalize_default_export(program.allocator, &mut program.program)
    }
}

/// Removes the listed exports and the code only they used
pub struct RemoveExports {
    pub exports: Vec<String>,
}

impl RemoveExports {
    /// The server-only route exports (`loader`, `action`, `headers`)
    pub fn server_only() -> Self {
        Self {
            exports: SERVER_ONLY_ROUTE_EXPORTS
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        }
    }
}

impl TransformPass for RemoveExports {
    fn name(&self) -> &'static str {
        "remove-exports"
    }

    fn run(&self, program: &mut ParsedProgram) -> Result<bool> {
        let names: Vec<&str> = self.exports.iter().map(String::as_str).collect();
        remove_exports(&mut program.program, &names)
    }
}

/// Wraps component exports with the props wrappers
pub struct WrapComponentProps;

impl TransformPass for WrapComponentProps {
    fn name(&self) -> &'static str {
        "wrap-component-props"
    }

    fn run(&self, program: &mut ParsedProgram) -> Result<bool> {
        Ok(transform_route(program.allocator, &mut program.program))
    }
}

/// Parses once, runs passes in insertion order, prints once
pub struct TransformEngine<'a> {
    allocator: &'a Allocator,
    passes: Vec<Box<dyn TransformPass + 'a>>,
    parse_options: ParseOptions,
    source_map_path: Option<&'a Path>,
}

impl<'a> TransformEngine<'a> {
    pub fn new(allocator: &'a Allocator) -> Self {
        Self {
            allocator,
            passes: Vec::new(),
            parse_options: ParseOptions::default(),
            source_map_path: None,
        }
    }

    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Emit a source map that points back to `path`
    pub fn with_source_map(mut self, path: &'a Path) -> Self {
        self.source_map_path = Some(path);
        self
    }

    pub fn add_pass<P: TransformPass + 'a>(mut self, pass: P) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn transform(&self, source: &'a str) -> Result<TransformOutput> {
        let mut parsed = parse(self.allocator, source, self.parse_options.clone())?;

        let mut modified = false;
        for pass in &self.passes {
            if pass.run(&mut parsed)? {
                tracing::trace!(pass = pass.name(), file = %self.parse_options.file_name, "pass modified module");
                modified = true;
            }
        }

        let generated = generate(&parsed.program, self.source_map_path);
        Ok(TransformOutput {
            code: generated.code,
            map: generated.map,
            modified,
        })
    }
}

/// Printed module after all passes
#[derive(Debug)]
pub struct TransformOutput {
    pub code: String,
    /// JSON source map, when requested
    pub map: Option<String>,
    /// False when no pass touched the program
    pub modified: bool,
}

/// Compilation target a route module is rewritten for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    /// Browser bundles never see server-only exports
    Browser,
    /// Server bundles keep every export
    Server,
}

/// Rewrite one route module for `target`
///
/// Runs default-export normalization, then server-only export removal for the
/// browser, then the component props wrappers. `id` may carry a resource query.
/// No source map is produced; see [`transform_route_module_with_map`].
pub fn transform_route_module(source: &str, id: &str, target: RouteTarget) -> Result<TransformOutput> {
    rewrite_route_module(source, id, target, false)
}

/// Like [`transform_route_module`], with a source map pointing back to `id`
pub fn transform_route_module_with_map(
    source: &str,
    id: &str,
    target: RouteTarget,
) -> Result<TransformOutput> {
    rewrite_route_module(source, id, target, true)
}

fn rewrite_route_module(
    source: &str,
    id: &str,
    target: RouteTarget,
    source_map: bool,
) -> Result<TransformOutput> {
    let allocator = Allocator::default();
    let file = Path::new(strip_query(id));

    let mut engine = TransformEngine::new(&allocator).with_parse_options(ParseOptions::from_path(id));
    if source_map {
        engine = engine.with_source_map(file);
    }
    engine = engine.add_pass(NormalizeDefaultExport);
    if target == RouteTarget::Browser {
        engine = engine.add_pass(RemoveExports::server_only());
    }
    engine.add_pass(WrapComponentProps).transform(source)
}
