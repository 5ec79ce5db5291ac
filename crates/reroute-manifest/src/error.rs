//! Error types for manifest construction

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while building or serializing a route manifest
#[derive(Error, Debug, Diagnostic)]
pub enum ManifestError {
    /// Two routes resolved to the same id
    #[error("Unable to define routes with duplicate route id: \"{id}\"")]
    #[diagnostic(
        code(reroute::manifest::duplicate_route_id),
        help("give one of the routes an explicit `id`")
    )]
    DuplicateRouteId { id: String },

    /// Manifest payload could not be encoded
    #[error("Failed to encode manifest: {0}")]
    #[diagnostic(code(reroute::manifest::json))]
    Json(#[from] serde_json::Error),

    /// Writing generated module text failed
    #[error("Failed to write generated module: {0}")]
    #[diagnostic(code(reroute::manifest::format))]
    Format(#[from] std::fmt::Error),
}

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, ManifestError>;
