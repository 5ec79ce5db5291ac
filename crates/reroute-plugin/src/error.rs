use std::path::PathBuf;

use thiserror::Error;

/// Errors from setting up or running a React Router build
#[derive(Debug, Error)]
pub enum Error {
    /// Error reported by Rolldown
    #[error("Rolldown bundler error: {0}")]
    Bundler(String),

    /// Invalid project or route configuration
    #[error(transparent)]
    Config(#[from] reroute_config::ConfigError),

    /// Route manifest could not be built or serialized
    #[error(transparent)]
    Manifest(#[from] reroute_manifest::ManifestError),

    /// Route module rewriting failed
    #[error(transparent)]
    Gen(#[from] reroute_gen::GenError),

    /// The app has no root route module
    #[error("Could not find a root route module at {}.{{tsx,ts,jsx,js,mjs}}", .0.display())]
    MissingEntry(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for reroute-plugin operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a bundler error from a batch of Rolldown diagnostics.
    pub fn from_rolldown_batch(error: &dyn std::fmt::Debug) -> Self {
        Error::Bundler(format!("{error:?}"))
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Manifest(err) => miette::Diagnostic::code(err),
            Error::Gen(err) => miette::Diagnostic::code(err),
            other => Some(Box::new(match other {
                Error::Bundler(_) => "BUNDLER_ERROR",
                Error::Config(_) => "CONFIG_ERROR",
                Error::MissingEntry(_) => "MISSING_ENTRY",
                _ => "IO_ERROR",
            })),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Manifest(err) => miette::Diagnostic::help(err),
            Error::Gen(err) => miette::Diagnostic::help(err),
            Error::Config(_) => Some(Box::new(
                "Check react-router.config.{toml,json} and the route config in the app directory",
            )),
            Error::MissingEntry(path) => Some(Box::new(format!(
                "Create {}.tsx exporting the root layout",
                path.display()
            ))),
            _ => None,
        }
    }
}
