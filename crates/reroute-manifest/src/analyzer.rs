//! Static discovery of route lifecycle exports
//!
//! A route file is parsed on its own, never bundled or evaluated, and its export
//! surface is intersected with [`MANIFEST_FLAG_EXPORTS`]. Failures degrade to an
//! empty set so one broken route cannot stop manifest generation.

use std::collections::BTreeSet;
use std::path::Path;

use reroute_gen::{GenError, MANIFEST_FLAG_EXPORTS, module_exports};
use tracing::warn;

/// Recognized lifecycle exports of one route module
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteExports {
    names: BTreeSet<String>,
}

impl RouteExports {
    /// Keep the recognized names out of `names`
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .filter(|name| MANIFEST_FLAG_EXPORTS.contains(&name.as_ref()))
                .map(|name| name.as_ref().to_string())
                .collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn has_loader(&self) -> bool {
        self.contains("loader")
    }

    pub fn has_action(&self) -> bool {
        self.contains("action")
    }

    pub fn has_client_loader(&self) -> bool {
        self.contains("clientLoader")
    }

    pub fn has_client_action(&self) -> bool {
        self.contains("clientAction")
    }

    pub fn has_error_boundary(&self) -> bool {
        self.contains("ErrorBoundary")
    }
}

/// Analyze route source text; `path` selects the dialect
///
/// # Errors
///
/// Returns the parse error; callers that must not fail use [`analyze_route_file`].
pub fn analyze_source(source: &str, path: &Path) -> Result<RouteExports, GenError> {
    let names = module_exports(source, &path.to_string_lossy())?;
    Ok(RouteExports::from_names(names))
}

/// Analyze a route file on disk
///
/// Missing files and syntax errors are logged and yield an empty set.
pub async fn analyze_route_file(path: &Path) -> RouteExports {
    let source = match tokio::fs::read_to_string(path).await {
        Ok(source) => source,
        Err(err) => {
            warn!(file = %path.display(), error = %err, "Failed to analyze route file");
            return RouteExports::default();
        }
    };

    match analyze_source(&source, path) {
        Ok(exports) => exports,
        Err(err) => {
            warn!(file = %path.display(), error = %err, "Failed to analyze route file");
            RouteExports::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersects_with_flag_vocabulary() {
        let exports = analyze_source(
            r#"
            export const loader = () => null;
            export async function clientAction() {}
            export function ErrorBoundary() {}
            export const meta = () => [];
            export default function Page() {}
            "#,
            Path::new("routes/page.tsx"),
        )
        .unwrap();

        assert!(exports.has_loader());
        assert!(exports.has_client_action());
        assert!(exports.has_error_boundary());
        assert!(!exports.has_action());
        assert!(!exports.has_client_loader());
        assert_eq!(
            exports.iter().collect::<Vec<_>>(),
            vec!["ErrorBoundary", "clientAction", "loader"]
        );
    }

    #[test]
    fn specifier_exports_count() {
        let exports = analyze_source(
            "const fn = () => null;\nexport { fn as action };",
            Path::new("routes/page.ts"),
        )
        .unwrap();
        assert!(exports.has_action());
    }

    #[test]
    fn syntax_errors_surface_from_analyze_source() {
        assert!(analyze_source("export const = ;", Path::new("broken.tsx")).is_err());
    }
}
