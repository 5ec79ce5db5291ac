//! Plugin hooks against an app on disk
//!
//! These tests drive the hooks directly; no Rolldown compile is run.

use std::fs;
use std::path::Path;

use reroute_config::{PluginOptions, ReactRouterConfig, ServerOutput};
use reroute_manifest::constants::{
    BROWSER_MANIFEST_ID, SERVER_BUILD_ID, SERVER_MANIFEST_ID, WITH_PROPS_ID,
};
use reroute_plugin::{
    ENTRY_CLIENT_TEMPLATE, Environment, HookLoadArgs, Plugin, PluginContext, Prepared,
    ReactRouterBuild, ReactRouterPlugin,
};
use rolldown_common::{ModuleType, Output};
use tempfile::TempDir;

const HOME: &str = r#"import { db } from "../db.server";

export async function loader() {
  return db.posts();
}

export function meta() {
  return [{ title: "Home" }];
}

export default function Home() {
  return null;
}
"#;

fn write(root: &Path, file: &str, source: &str) {
    let path = root.join(file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, source).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "app/root.tsx", "export default function Root() { return null; }\n");
    write(root, "app/routes/home.tsx", HOME);
    write(
        root,
        "app/routes.json",
        r#"[{ "file": "routes/home.tsx", "index": true }]"#,
    );
    dir
}

async fn prepare(root: &Path, options: PluginOptions) -> Prepared {
    ReactRouterBuild::new(root, ReactRouterConfig::default(), options)
        .prepare()
        .await
        .unwrap()
}

fn route_id(root: &Path, file: &str) -> String {
    format!(
        "{}?react-router-route",
        root.join("app").join(file).to_string_lossy().replace('\\', "/")
    )
}

#[tokio::test]
async fn prepare_uses_templates_for_missing_entries() {
    let dir = project();
    let prepared = prepare(dir.path(), PluginOptions::default()).await;

    assert!(prepared.entries.client.ends_with("build/.react-router/entry.client.tsx"));
    assert_eq!(
        fs::read_to_string(&prepared.entries.client).unwrap(),
        ENTRY_CLIENT_TEMPLATE
    );
    assert!(prepared.entries.server_app.is_none());

    let names: Vec<String> = prepared
        .browser_inputs()
        .into_iter()
        .filter_map(|input| input.name)
        .collect();
    assert_eq!(
        names,
        vec!["entry.client", BROWSER_MANIFEST_ID, "root", "routes/home"]
    );

    let server = prepared.server_inputs();
    assert_eq!(server[0].name.as_deref(), Some("app"));
    assert_eq!(server[0].import, SERVER_BUILD_ID);
    assert_eq!(server[1].name.as_deref(), Some("entry.server"));
}

#[tokio::test]
async fn user_entries_and_server_app_win() {
    let dir = project();
    write(dir.path(), "app/entry.client.jsx", "// client\n");
    write(dir.path(), "server/app.ts", "export default {};\n");

    let prepared = prepare(dir.path(), PluginOptions::default()).await;
    assert_eq!(prepared.entries.client, dir.path().join("app/entry.client.jsx"));
    assert_eq!(
        prepared.entries.server_app.as_deref(),
        Some(dir.path().join("server/app.ts").as_path())
    );
    assert!(prepared.server_inputs()[0].import.ends_with("server/app.ts"));
}

#[tokio::test]
async fn load_hook_serves_virtual_modules() {
    let dir = project();
    let prepared = prepare(dir.path(), PluginOptions::default()).await;
    let plugin = ReactRouterPlugin::new(prepared.context.clone(), Environment::Browser);
    let ctx = PluginContext::new_napi_context();

    let output = plugin
        .load(&ctx, &HookLoadArgs { id: BROWSER_MANIFEST_ID })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        output.code.as_str(),
        "window.__reactRouterManifest = \"PLACEHOLDER\";\n"
    );
    assert!(matches!(output.module_type, Some(ModuleType::Js)));

    let with_props = plugin
        .load(&ctx, &HookLoadArgs { id: WITH_PROPS_ID })
        .await
        .unwrap()
        .unwrap();
    assert!(with_props.code.contains("export function withComponentProps("));

    let server_build = plugin.load_module(SERVER_BUILD_ID).await.unwrap().unwrap();
    assert!(server_build.code.contains("export const routes = {"));
    assert!(server_build.code.contains(&route_id(dir.path(), "routes/home.tsx")));

    assert!(plugin.load_module("/elsewhere/file.ts").await.unwrap().is_none());
}

#[tokio::test]
async fn route_modules_load_as_source_and_transform_per_environment() {
    let dir = project();
    let prepared = prepare(dir.path(), PluginOptions::default()).await;
    let id = route_id(dir.path(), "routes/home.tsx");

    let browser = ReactRouterPlugin::new(prepared.context.clone(), Environment::Browser);
    let loaded = browser.load_module(&id).await.unwrap().unwrap();
    assert_eq!(loaded.code, HOME);
    assert!(matches!(loaded.module_type, ModuleType::Tsx));

    let client_code = browser.transform_module(&id, HOME).unwrap().unwrap();
    assert!(!client_code.contains("loader"));
    assert!(!client_code.contains("db.server"));
    assert!(client_code.contains("meta"));
    assert!(client_code.contains("withComponentProps"));

    let server = ReactRouterPlugin::new(prepared.context.clone(), Environment::Server);
    let server_code = server.transform_module(&id, HOME).unwrap().unwrap();
    assert!(server_code.contains("loader"));
    assert!(server_code.contains("db.server"));

    assert!(browser.transform_module("/app/other.tsx", HOME).unwrap().is_none());
}

#[tokio::test]
async fn federated_route_ids_load_a_proxy() {
    let dir = project();
    let prepared = prepare(dir.path(), PluginOptions::default()).await;
    let id = route_id(dir.path(), "routes/home.tsx").replace(
        "?react-router-route",
        "?react-router-route-federation",
    );

    let browser = ReactRouterPlugin::new(prepared.context.clone(), Environment::Browser);
    let proxy = browser.load_module(&id).await.unwrap().unwrap().code;
    assert!(proxy.contains("await import("));
    assert!(proxy.contains("meta"));
    assert!(!proxy.contains("loader"));

    let server = ReactRouterPlugin::new(prepared.context.clone(), Environment::Server);
    let proxy = server.load_module(&id).await.unwrap().unwrap().code;
    assert!(proxy.contains("export const loader = "));
}

#[tokio::test]
async fn browser_stats_feed_the_server_manifest() {
    let dir = project();
    let prepared = prepare(dir.path(), PluginOptions::default()).await;
    let browser = ReactRouterPlugin::new(prepared.context.clone(), Environment::Browser);
    let server = ReactRouterPlugin::new(prepared.context.clone(), Environment::Server);

    assert!(prepared.context.client_stats().is_none());
    let mut bundle = Vec::new();
    browser.finish_bundle(&mut bundle).await.unwrap();
    assert!(prepared.context.client_stats().is_some());

    let manifest = server.load_module(SERVER_MANIFEST_ID).await.unwrap().unwrap();
    let json = manifest
        .code
        .trim_start_matches("export default ")
        .trim_end()
        .trim_end_matches(';');
    let payload: serde_json::Value = serde_json::from_str(json).unwrap();
    assert_eq!(payload["routes"]["routes/home"]["hasLoader"], true);
    assert_eq!(payload["routes"]["routes/home"]["parentId"], "root");
    assert_eq!(payload["routes"]["root"]["module"], "");
}

#[tokio::test]
async fn server_bundle_gets_package_json() {
    let dir = project();
    let prepared = prepare(
        dir.path(),
        PluginOptions {
            server_output: ServerOutput::Commonjs,
            ..PluginOptions::default()
        },
    )
    .await;
    let server = ReactRouterPlugin::new(prepared.context.clone(), Environment::Server);

    let mut bundle = Vec::new();
    server.finish_bundle(&mut bundle).await.unwrap();

    let [Output::Asset(asset)] = bundle.as_slice() else {
        panic!("expected a single asset");
    };
    assert_eq!(asset.filename.as_str(), "package.json");
    assert_eq!(asset.names, vec!["package.json".to_string()]);
}

#[test]
fn resolves_only_owned_specifiers() {
    assert_eq!(
        ReactRouterPlugin::resolve_specifier(SERVER_BUILD_ID, None).as_deref(),
        Some(SERVER_BUILD_ID)
    );
    assert_eq!(
        ReactRouterPlugin::resolve_specifier("/app/routes/a.tsx?react-router-route", None)
            .as_deref(),
        Some("/app/routes/a.tsx?react-router-route")
    );
    assert_eq!(
        ReactRouterPlugin::resolve_specifier(
            "./b.tsx?react-router-route-federation",
            Some("/app/routes/a.tsx?react-router-route")
        )
        .as_deref(),
        Some("/app/routes/b.tsx?react-router-route-federation")
    );
    assert_eq!(ReactRouterPlugin::resolve_specifier("react", None), None);
    assert_eq!(
        ReactRouterPlugin::resolve_specifier("./a.css?inline", Some("/app/root.tsx")),
        None
    );
}

#[tokio::test]
async fn missing_root_module_is_fatal() {
    let dir = project();
    fs::remove_file(dir.path().join("app/root.tsx")).unwrap();

    let err = ReactRouterBuild::new(dir.path(), ReactRouterConfig::default(), PluginOptions::default())
        .prepare()
        .await
        .unwrap_err();
    assert!(matches!(err, reroute_plugin::Error::MissingEntry(_)));
}
