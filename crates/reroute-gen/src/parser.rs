//! Parser façade for reading route modules
//!
//! Route ids carry a resource query (`/app/routes/home.tsx?react-router-route`),
//! so source type detection strips it before looking at the extension.

use crate::error::{GenError, Result};
use oxc_allocator::Allocator;
use oxc_ast::ast::{Program, Statement};
use oxc_parser::Parser;
use oxc_span::SourceType;

#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub source_type: SourceType,
    /// Return the partial program instead of failing on syntax errors
    pub allow_errors: bool,
    /// Used in error messages
    pub file_name: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_type: SourceType::tsx(),
            allow_errors: false,
            file_name: "<anonymous>".to_string(),
        }
    }
}

impl ParseOptions {
    /// Source type from the extension of a path or module id
    ///
    /// Unknown extensions fall back to TSX, the superset every route module
    /// dialect parses under.
    pub fn from_path(path: &str) -> Self {
        let file = strip_query(path);
        Self {
            source_type: SourceType::from_path(file).unwrap_or(SourceType::tsx()),
            allow_errors: false,
            file_name: file.to_string(),
        }
    }

    pub fn tsx() -> Self {
        Self::default()
    }
}

/// Drop a `?query` suffix from a module id
pub fn strip_query(id: &str) -> &str {
    id.split_once('?').map_or(id, |(path, _)| path)
}

#[derive(Debug, Clone)]
pub struct ParseDiagnostic {
    pub message: String,
}

/// A program together with the allocator its nodes live in
///
/// Passes that synthesize nodes allocate them from `allocator`.
pub struct ParsedProgram<'a> {
    pub program: Program<'a>,
    /// Syntax errors, only non-empty with `allow_errors`
    pub diagnostics: Vec<ParseDiagnostic>,
    pub allocator: &'a Allocator,
}

impl ParsedProgram<'_> {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Parse `source`, failing on syntax errors unless `options.allow_errors` is set
pub fn parse<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    options: ParseOptions,
) -> Result<ParsedProgram<'a>> {
    let result = Parser::new(allocator, source, options.source_type).parse();

    let diagnostics: Vec<ParseDiagnostic> = result
        .errors
        .iter()
        .map(|err| ParseDiagnostic {
            message: err.to_string(),
        })
        .collect();

    if !options.allow_errors && (!diagnostics.is_empty() || result.panicked) {
        let reason = if diagnostics.is_empty() {
            "parser aborted".to_string()
        } else {
            diagnostics
                .iter()
                .map(|d| d.message.clone())
                .collect::<Vec<_>>()
                .join(", ")
        };
        return Err(GenError::parse(options.file_name, reason));
    }

    Ok(ParsedProgram {
        program: result.program,
        diagnostics,
        allocator,
    })
}

/// Parse a single module-level statement from text
///
/// Used to splice small synthesized statements into an existing program. The
/// text is copied into the allocator so the statement lives as long as the
/// program it is inserted into.
pub(crate) fn parse_statement<'a>(allocator: &'a Allocator, text: &str) -> Result<Statement<'a>> {
    let text = allocator.alloc_str(text);
    let mut result = Parser::new(allocator, text, SourceType::mjs()).parse();
    if !result.errors.is_empty() {
        return Err(GenError::codegen_failed_with_reason(
            "synthesized statement",
            text.to_string(),
        ));
    }
    result.program.body.pop().ok_or_else(|| {
        GenError::codegen_failed_with_reason("synthesized statement", "empty program")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_source_type_through_query() {
        let options = ParseOptions::from_path("/app/routes/home.tsx?react-router-route");
        assert!(options.source_type.is_typescript());
        assert!(options.source_type.is_jsx());
        assert_eq!(options.file_name, "/app/routes/home.tsx");
    }

    #[test]
    fn reports_syntax_errors_with_file_name() {
        let allocator = Allocator::default();
        let err = match parse(&allocator, "export const = ;", ParseOptions::from_path("bad.ts")) {
            Err(err) => err,
            Ok(_) => panic!("expected a parse error"),
        };
        assert!(err.to_string().contains("bad.ts"));
    }

    #[test]
    fn allow_errors_returns_partial_program() {
        let allocator = Allocator::default();
        let options = ParseOptions {
            allow_errors: true,
            ..ParseOptions::from_path("bad.ts")
        };
        let parsed = parse(&allocator, "export const = ;", options).unwrap();
        assert!(parsed.has_errors());
    }
}
