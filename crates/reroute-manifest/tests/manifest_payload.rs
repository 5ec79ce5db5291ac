//! Manifest payload built against route files on disk

use std::fs;

use reroute_manifest::{
    ClientStats, RouteNode, SerializeOptions, build_route_manifest, replace_placeholder,
    serialize_manifest,
};
use tempfile::TempDir;

fn write(dir: &TempDir, file: &str, source: &str) {
    let path = dir.path().join(file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, source).unwrap();
}

fn app() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "root.tsx",
        "export function ErrorBoundary() { return null; }\nexport default function Root() { return null; }\n",
    );
    write(
        &dir,
        "routes/home.tsx",
        "export async function loader() { return {}; }\nexport const clientAction = async () => null;\nexport default function Home() { return null; }\n",
    );
    write(&dir, "routes/broken.tsx", "export const = ;");
    dir
}

fn stats() -> ClientStats {
    let mut stats = ClientStats::default();
    stats.assets_by_chunk_name.insert(
        "entry.client".into(),
        vec!["static/js/entry.client.js".into(), "static/js/chunk-react.js".into()],
    );
    stats.assets_by_chunk_name.insert(
        "routes/home".into(),
        vec![
            "static/js/routes/home.js".into(),
            "static/js/chunk-react.js".into(),
            "static/css/routes/home.css".into(),
        ],
    );
    stats.assets_by_chunk_name.insert(
        "virtual/react-router/browser-manifest".into(),
        vec!["static/js/browser-manifest.js".into()],
    );
    stats
}

#[tokio::test]
async fn payload_combines_assets_and_export_flags() {
    let dir = app();
    let routes = [
        RouteNode::new("routes/home.tsx").index(),
        RouteNode::new("routes/broken.tsx").with_path("broken"),
        RouteNode::new("routes/missing.tsx").with_path("missing"),
    ];
    let manifest = build_route_manifest(dir.path(), &routes).unwrap();
    let payload = serialize_manifest(
        &manifest,
        Some(&stats()),
        dir.path(),
        &SerializeOptions::default(),
    )
    .await;

    assert_eq!(payload.url, "/static/js/browser-manifest.js");
    assert_eq!(payload.entry.module, "/static/js/entry.client.js");
    assert_eq!(
        payload.entry.imports,
        vec!["/static/js/entry.client.js", "/static/js/chunk-react.js"]
    );

    let keys: Vec<&str> = payload.routes.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["root", "routes/home", "routes/broken", "routes/missing"]);

    let root = &payload.routes["root"];
    assert!(root.has_error_boundary);
    assert!(!root.has_loader);
    assert_eq!(root.module, "");

    let home = &payload.routes["routes/home"];
    assert_eq!(home.parent_id.as_deref(), Some("root"));
    assert_eq!(home.module, "/static/js/routes/home.js");
    assert_eq!(home.css, vec!["/static/css/routes/home.css"]);
    assert!(home.has_loader);
    assert!(home.has_client_action);
    assert!(!home.has_action);
    assert!(!home.has_client_loader);

    // Unparseable and missing files degrade to no flags
    for id in ["routes/broken", "routes/missing"] {
        let route = &payload.routes[id];
        assert!(!route.has_loader && !route.has_action && !route.has_error_boundary);
    }
}

#[tokio::test]
async fn payload_without_stats_keeps_every_route() {
    let dir = app();
    let manifest =
        build_route_manifest(dir.path(), &[RouteNode::new("routes/home.tsx")]).unwrap();
    let payload =
        serialize_manifest(&manifest, None, dir.path(), &SerializeOptions::default()).await;

    assert_eq!(payload.routes.len(), 2);
    assert_eq!(payload.url, reroute_manifest::constants::DEFAULT_MANIFEST_URL);
    assert!(payload.routes.values().all(|route| route.module.is_empty()));
    assert!(payload.routes["routes/home"].has_loader);
}

#[tokio::test]
async fn versions_differ_between_serializations() {
    let dir = app();
    let manifest = build_route_manifest(dir.path(), &[]).unwrap();
    let options = SerializeOptions::default();
    let first = serialize_manifest(&manifest, None, dir.path(), &options).await;
    let second = serialize_manifest(&manifest, None, dir.path(), &options).await;
    assert_ne!(first.version, second.version);
}

#[tokio::test]
async fn patched_chunk_carries_payload() {
    let dir = app();
    let manifest = build_route_manifest(dir.path(), &[]).unwrap();
    let payload = serialize_manifest(
        &manifest,
        Some(&stats()),
        dir.path(),
        &SerializeOptions {
            public_path: "https://cdn.example.com/assets/".into(),
            ..SerializeOptions::default()
        },
    )
    .await;

    let code = reroute_manifest::browser_manifest_placeholder_module();
    let patched = replace_placeholder(&code, &payload).unwrap().unwrap();
    let json = patched
        .trim_start_matches("window.__reactRouterManifest = ")
        .trim_end()
        .trim_end_matches(';');
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(
        value["entry"]["module"],
        "https://cdn.example.com/assets/static/js/entry.client.js"
    );
    assert_eq!(value["routes"]["root"]["hasErrorBoundary"], true);
}
