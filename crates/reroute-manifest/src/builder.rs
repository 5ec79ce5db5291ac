//! Flattening a route tree into a manifest

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::{ROOT_ROUTE_FILE, ROOT_ROUTE_ID};
use crate::error::{ManifestError, Result};
use crate::paths::{create_route_id, relative_path, to_slash};
use crate::route::{ManifestRoute, RouteManifest, RouteNode};

/// Builds a [`RouteManifest`] from a route tree
///
/// The manifest always starts with the synthetic `root` route. Nodes are walked
/// depth first in declaration order; top-level nodes get `root` as their parent.
///
/// # Example
///
/// ```rust
/// use reroute_manifest::{RouteManifestBuilder, RouteNode};
///
/// let routes = vec![
///     RouteNode::new("routes/home.tsx").index(),
///     RouteNode::new("routes/blog.tsx")
///         .with_path("blog")
///         .with_children(vec![RouteNode::new("routes/blog.post.tsx").with_path(":slug")]),
/// ];
///
/// let manifest = RouteManifestBuilder::new("/project/app").build(&routes)?;
/// assert_eq!(manifest["routes/blog.post"].parent_id.as_deref(), Some("routes/blog"));
/// # Ok::<(), reroute_manifest::ManifestError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RouteManifestBuilder {
    app_directory: PathBuf,
    root_file: String,
}

impl RouteManifestBuilder {
    pub fn new(app_directory: impl Into<PathBuf>) -> Self {
        Self {
            app_directory: app_directory.into(),
            root_file: ROOT_ROUTE_FILE.to_string(),
        }
    }

    /// Use a different file for the synthetic root route
    pub fn with_root_file(mut self, root_file: impl AsRef<Path>) -> Self {
        self.root_file = self.relative_file(&to_slash(root_file.as_ref()));
        self
    }

    /// Flatten `routes`
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::DuplicateRouteId`] when two routes share an id.
    /// No partial manifest is returned.
    pub fn build(&self, routes: &[RouteNode]) -> Result<RouteManifest> {
        let mut walk = Walk {
            builder: self,
            manifest: RouteManifest::new(),
            user_root_seen: false,
        };

        walk.manifest.insert(
            ROOT_ROUTE_ID.to_string(),
            ManifestRoute {
                id: ROOT_ROUTE_ID.to_string(),
                parent_id: None,
                file: self.root_file.clone(),
                path: Some(String::new()),
                index: None,
                case_sensitive: None,
            },
        );

        walk.nodes(routes, ROOT_ROUTE_ID)?;
        debug!(routes = walk.manifest.len(), "built route manifest");
        Ok(walk.manifest)
    }

    fn relative_file(&self, file: &str) -> String {
        let path = Path::new(file);
        if path.is_absolute() {
            to_slash(&relative_path(&self.app_directory, path))
        } else {
            file.to_string()
        }
    }
}

struct Walk<'b> {
    builder: &'b RouteManifestBuilder,
    manifest: RouteManifest,
    user_root_seen: bool,
}

impl Walk<'_> {
    fn nodes(&mut self, nodes: &[RouteNode], parent_id: &str) -> Result<()> {
        for node in nodes {
            self.node(node, parent_id)?;
        }
        Ok(())
    }

    fn node(&mut self, node: &RouteNode, parent_id: &str) -> Result<()> {
        let file = self.builder.relative_file(&node.file);
        let id = node.id.clone().unwrap_or_else(|| create_route_id(&file));

        let mut route = ManifestRoute {
            id: id.clone(),
            parent_id: Some(parent_id.to_string()),
            file,
            path: node.path.clone(),
            index: node.index,
            case_sensitive: node.case_sensitive,
        };

        if id == ROOT_ROUTE_ID && !self.user_root_seen {
            // A declared root replaces the synthetic one in place.
            self.user_root_seen = true;
            if route.path.is_none() {
                route.path = Some(String::new());
            }
        } else if self.manifest.contains_key(&id) {
            return Err(ManifestError::DuplicateRouteId { id });
        }

        self.manifest.insert(id.clone(), route);
        self.nodes(&node.children, &id)
    }
}

/// Flatten `routes` relative to `app_directory`
///
/// See [`RouteManifestBuilder::build`].
pub fn build_route_manifest(
    app_directory: impl Into<PathBuf>,
    routes: &[RouteNode],
) -> Result<RouteManifest> {
    RouteManifestBuilder::new(app_directory).build(routes)
}
