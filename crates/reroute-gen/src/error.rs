//! Error types for route module rewriting

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while parsing, rewriting or printing a route module
#[derive(Error, Debug, Diagnostic)]
pub enum GenError {
    /// The source text could not be parsed
    #[error("Failed to parse {file}: {reason}")]
    #[diagnostic(code(reroute::gen::parse))]
    Parse { file: String, reason: String },

    /// A destructuring export binds a name that was requested for removal
    #[error("Cannot remove destructured export \"{name}\"")]
    #[diagnostic(
        code(reroute::gen::invalid_destructure),
        help("declare `{name}` in its own `export const` statement")
    )]
    InvalidDestructure { name: String },

    /// Code generation failed
    #[error("Code generation failed: {context}{}", reason.as_ref().map(|r| format!(" - {}", r)).unwrap_or_default())]
    #[diagnostic(code(reroute::gen::codegen_failed))]
    CodegenFailed {
        context: String,
        reason: Option<String>,
    },
}

impl GenError {
    /// Create a Parse error
    pub fn parse(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidDestructure error
    pub fn invalid_destructure(name: impl Into<String>) -> Self {
        Self::InvalidDestructure { name: name.into() }
    }

    /// Create a CodegenFailed error with reason
    pub fn codegen_failed_with_reason(
        context: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::CodegenFailed {
            context: context.into(),
            reason: Some(reason.into()),
        }
    }
}

/// Result type for route rewriting operations
pub type Result<T> = std::result::Result<T, GenError>;
