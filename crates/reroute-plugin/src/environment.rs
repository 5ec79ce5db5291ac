use std::fmt;

use reroute_config::ServerOutput;
use reroute_gen::RouteTarget;
use reroute_manifest::ProxyTarget;
use rolldown::{OutputFormat, Platform};

/// The two compiles of a React Router build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Browser bundle: entry client, browser manifest and one chunk per route
    Browser,
    /// Server bundle: server build (or custom server app) and entry server
    Server,
}

impl Environment {
    pub fn name(self) -> &'static str {
        match self {
            Environment::Browser => "web",
            Environment::Server => "node",
        }
    }

    pub fn platform(self) -> Platform {
        match self {
            Environment::Browser => Platform::Browser,
            Environment::Server => Platform::Node,
        }
    }

    pub fn output_format(self, server_output: ServerOutput) -> OutputFormat {
        match (self, server_output) {
            (Environment::Server, ServerOutput::Commonjs) => OutputFormat::Cjs,
            _ => OutputFormat::Esm,
        }
    }

    pub fn route_target(self) -> RouteTarget {
        match self {
            Environment::Browser => RouteTarget::Browser,
            Environment::Server => RouteTarget::Server,
        }
    }

    pub fn proxy_target(self) -> ProxyTarget {
        match self {
            Environment::Browser => ProxyTarget::Browser,
            Environment::Server => ProxyTarget::Server,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
