//! Route export vocabularies
//!
//! These are the names the routing runtime looks up on a route module. They are
//! plain data checked by membership.

/// Exports that only run on the server and are stripped from browser bundles
pub const SERVER_ONLY_ROUTE_EXPORTS: &[&str] = &["loader", "action", "headers"];

/// Exports a route module may provide to the browser
pub const CLIENT_ROUTE_EXPORTS: &[&str] = &[
    "clientAction",
    "clientLoader",
    "default",
    "ErrorBoundary",
    "handle",
    "HydrateFallback",
    "Layout",
    "links",
    "meta",
    "shouldRevalidate",
];

/// Named component exports that receive a props wrapper
pub const NAMED_COMPONENT_EXPORTS: &[&str] = &["HydrateFallback", "ErrorBoundary"];

/// Lifecycle exports recorded as flags in the route manifest
pub const MANIFEST_FLAG_EXPORTS: &[&str] = &[
    "loader",
    "action",
    "clientLoader",
    "clientAction",
    "ErrorBoundary",
];

/// Virtual module that provides the component props wrappers
pub const WITH_PROPS_MODULE: &str = "virtual/react-router/with-props";

/// Wrapper factory applied to the default export
pub const COMPONENT_WRAPPER: &str = "withComponentProps";

/// Wrapper factory for a named component export (`withErrorBoundaryProps`, ...)
pub fn named_component_wrapper(name: &str) -> Option<String> {
    NAMED_COMPONENT_EXPORTS
        .contains(&name)
        .then(|| format!("with{name}Props"))
}
