//! Printing rewritten programs back to source text

use std::path::Path;

use oxc_ast::ast::Program;
use oxc_codegen::{Codegen, CodegenOptions};

/// Generated source text with an optional JSON source map
#[derive(Debug, Clone)]
pub struct GeneratedCode {
    pub code: String,
    pub map: Option<String>,
}

/// Print a program
///
/// A source map is produced when `source_path` is given.
pub fn generate(program: &Program<'_>, source_path: Option<&Path>) -> GeneratedCode {
    let options = CodegenOptions {
        source_map_path: source_path.map(Path::to_path_buf),
        ..CodegenOptions::default()
    };
    let result = Codegen::new().with_options(options).build(program);

    GeneratedCode {
        code: result.code,
        map: result.map.map(|map| map.to_json_string()),
    }
}
