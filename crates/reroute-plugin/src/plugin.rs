//! Rolldown plugin wiring React Router routes into a compile
//!
//! One instance runs per [`Environment`]. Both share a [`RouterContext`].
//!
//! ```text
//! resolve_id  virtual/react-router/*, <file>?react-router-route[-federation]
//!     ↓
//! load        virtual module source, route file text, federated proxy
//!     ↓
//! transform   route modules: normalize default, strip server exports (web), wrap props
//!     ↓
//! generate_bundle
//!             web:  capture stats, patch the browser manifest chunk
//!             node: emit package.json
//! ```

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use path_clean::PathClean;
use reroute_config::ServerOutput;
use reroute_gen::{module_exports, transform_route_module};
use reroute_manifest::constants::{
    BROWSER_MANIFEST_ID, ROUTE_FEDERATION_QUERY, ROUTE_QUERY, SERVER_BUILD_ID, SERVER_MANIFEST_ID,
    WITH_PROPS_ID, strip_route_query,
};
use reroute_manifest::{
    browser_manifest_placeholder_module, generate_route_proxy, generate_server_build,
    replace_placeholder, server_manifest_module, with_props_module,
};
use rolldown_common::{ModuleType, Output, OutputAsset};
use rolldown_plugin::{
    HookGenerateBundleArgs, HookLoadArgs, HookLoadOutput, HookLoadReturn, HookNoopReturn,
    HookResolveIdArgs, HookResolveIdOutput, HookResolveIdReturn, HookTransformArgs,
    HookTransformOutput, HookTransformReturn, HookUsage, Plugin, PluginContext,
    SharedTransformPluginContext,
};
use tracing::debug;

use crate::environment::Environment;
use crate::state::RouterContext;
use crate::stats::collect_client_stats;

const VIRTUAL_MODULES: &[&str] = &[
    BROWSER_MANIFEST_ID,
    SERVER_MANIFEST_ID,
    SERVER_BUILD_ID,
    WITH_PROPS_ID,
];

/// Source produced by [`ReactRouterPlugin::load_module`]
#[derive(Debug, Clone)]
pub struct LoadedModule {
    pub code: String,
    pub module_type: ModuleType,
}

/// React Router integration for one compile
#[derive(Debug, Clone)]
pub struct ReactRouterPlugin {
    context: Arc<RouterContext>,
    environment: Environment,
}

impl ReactRouterPlugin {
    pub fn new(context: Arc<RouterContext>, environment: Environment) -> Self {
        Self {
            context,
            environment,
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn context(&self) -> &Arc<RouterContext> {
        &self.context
    }

    /// Id for a specifier this plugin owns
    ///
    /// Virtual modules resolve to themselves. Route query specifiers resolve
    /// against the importer's directory when relative.
    pub fn resolve_specifier(specifier: &str, importer: Option<&str>) -> Option<String> {
        if VIRTUAL_MODULES.contains(&specifier) {
            return Some(specifier.to_string());
        }

        let (file, query) = specifier.split_once('?')?;
        if query != ROUTE_QUERY && query != ROUTE_FEDERATION_QUERY {
            return None;
        }

        let path = Path::new(file);
        if path.is_absolute() {
            return Some(specifier.to_string());
        }

        let base = importer
            .map(|importer| Path::new(reroute_gen::strip_query(importer)))
            .and_then(Path::parent)?;
        let resolved = reroute_manifest::to_slash(&base.join(path).clean());
        Some(format!("{resolved}?{query}"))
    }

    /// Source of a virtual module or route module id
    pub async fn load_module(&self, id: &str) -> Result<Option<LoadedModule>> {
        let code = match id {
            BROWSER_MANIFEST_ID => browser_manifest_placeholder_module(),
            SERVER_MANIFEST_ID => {
                let payload = self.context.manifest_payload(None).await;
                server_manifest_module(&payload)?
            }
            SERVER_BUILD_ID => {
                generate_server_build(&self.context.manifest, &self.context.server_build_options())?
            }
            WITH_PROPS_ID => with_props_module().to_string(),
            _ => return self.load_route_module(id).await,
        };

        Ok(Some(LoadedModule {
            code,
            module_type: ModuleType::Js,
        }))
    }

    async fn load_route_module(&self, id: &str) -> Result<Option<LoadedModule>> {
        if let Some(file) = strip_route_query(id, ROUTE_QUERY) {
            let code = read_route_file(file).await?;
            return Ok(Some(LoadedModule {
                code,
                module_type: module_type_for(file),
            }));
        }

        if let Some(file) = strip_route_query(id, ROUTE_FEDERATION_QUERY) {
            let source = read_route_file(file).await?;
            let transformed =
                transform_route_module(&source, id, self.environment.route_target())
                    .with_context(|| format!("Failed to transform route {file}"))?;
            let exports = module_exports(&transformed.code, file)?;
            let code = generate_route_proxy(file, &exports, self.environment.proxy_target())?;
            debug!(route = file, exports = exports.len(), env = %self.environment, "Generated federated route proxy");
            return Ok(Some(LoadedModule {
                code,
                module_type: ModuleType::Js,
            }));
        }

        Ok(None)
    }

    /// Rewrite a `?react-router-route` module for this environment
    pub fn transform_module(&self, id: &str, code: &str) -> Result<Option<String>> {
        if strip_route_query(id, ROUTE_QUERY).is_none() {
            return Ok(None);
        }

        let output = transform_route_module(code, id, self.environment.route_target())
            .with_context(|| format!("Failed to transform route module {id}"))?;
        debug!(id, modified = output.modified, env = %self.environment, "Transformed route module");
        Ok(Some(output.code))
    }

    /// Post-process the emitted files of this environment
    pub async fn finish_bundle(&self, bundle: &mut Vec<Output>) -> Result<()> {
        match self.environment {
            Environment::Browser => self.finish_browser_bundle(bundle).await,
            Environment::Server => {
                bundle.push(self.server_package_json());
                Ok(())
            }
        }
    }

    async fn finish_browser_bundle(&self, bundle: &mut [Output]) -> Result<()> {
        let stats = collect_client_stats(bundle);
        let payload = self.context.manifest_payload(Some(&stats)).await;
        self.context.set_client_stats(stats);

        for output in bundle.iter_mut() {
            let Output::Chunk(chunk) = output else {
                continue;
            };
            if chunk.name.as_str() != BROWSER_MANIFEST_ID {
                continue;
            }
            if let Some(code) = replace_placeholder(&chunk.code, &payload)? {
                debug!(file = %chunk.filename, "Patched browser manifest");
                Arc::make_mut(chunk).code = code;
            }
        }
        Ok(())
    }

    fn server_package_json(&self) -> Output {
        Output::Asset(Arc::new(OutputAsset {
            names: vec!["package.json".to_string()],
            original_file_names: vec![],
            filename: "package.json".into(),
            source: package_json(self.context.options.server_output).into(),
        }))
    }
}

fn package_json(server_output: ServerOutput) -> String {
    serde_json::json!({ "type": server_output.as_str() }).to_string()
}

async fn read_route_file(file: &str) -> Result<String> {
    tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read route module: {file}"))
}

fn module_type_for(file: &str) -> ModuleType {
    match Path::new(file).extension().and_then(|ext| ext.to_str()) {
        Some("tsx") => ModuleType::Tsx,
        Some("ts" | "mts" | "cts") => ModuleType::Ts,
        Some("jsx") => ModuleType::Jsx,
        _ => ModuleType::Js,
    }
}

impl Plugin for ReactRouterPlugin {
    fn name(&self) -> Cow<'static, str> {
        "react-router".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::ResolveId | HookUsage::Load | HookUsage::Transform | HookUsage::GenerateBundle
    }

    fn resolve_id(
        &self,
        _ctx: &PluginContext,
        args: &HookResolveIdArgs<'_>,
    ) -> impl std::future::Future<Output = HookResolveIdReturn> + Send {
        let resolved = Self::resolve_specifier(args.specifier, args.importer);

        async move {
            Ok(resolved.map(|id| HookResolveIdOutput {
                id: id.into(),
                ..Default::default()
            }))
        }
    }

    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let id = args.id.to_string();
        let plugin = self.clone();

        async move {
            let Some(module) = plugin.load_module(&id).await? else {
                return Ok(None);
            };
            Ok(Some(HookLoadOutput {
                code: module.code.into(),
                module_type: Some(module.module_type),
                ..Default::default()
            }))
        }
    }

    fn transform(
        &self,
        _ctx: SharedTransformPluginContext,
        args: &HookTransformArgs<'_>,
    ) -> impl std::future::Future<Output = HookTransformReturn> + Send {
        let result = self.transform_module(args.id, args.code);

        async move {
            Ok(result?.map(|code| HookTransformOutput {
                code: Some(code),
                map: None,
                side_effects: None,
                module_type: None,
            }))
        }
    }

    fn generate_bundle(
        &self,
        _ctx: &PluginContext,
        args: &mut HookGenerateBundleArgs<'_>,
    ) -> impl std::future::Future<Output = HookNoopReturn> + Send {
        let plugin = self.clone();
        let bundle = &mut *args.bundle;

        async move {
            plugin.finish_bundle(bundle).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_json_follows_server_output() {
        assert_eq!(package_json(ServerOutput::Module), r#"{"type":"module"}"#);
        assert_eq!(package_json(ServerOutput::Commonjs), r#"{"type":"commonjs"}"#);
    }

    #[test]
    fn module_type_from_extension() {
        assert!(matches!(module_type_for("/app/root.tsx"), ModuleType::Tsx));
        assert!(matches!(module_type_for("/app/routes/a.mts"), ModuleType::Ts));
        assert!(matches!(module_type_for("/app/routes/b.jsx"), ModuleType::Jsx));
        assert!(matches!(module_type_for("/app/routes/c.mjs"), ModuleType::Js));
    }
}
