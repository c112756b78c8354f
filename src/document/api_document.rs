use std::sync::Arc;

use crate::config::DocConfig;
use crate::cors::{AccessControlAllow, CorsTable};
use crate::method::HttpMethod;
use crate::path::to_route_path;
use crate::rules::ParameterRules;
use crate::swagger::Swagger;

/// One registered operation, as the host framework needs to route it.
#[derive(Debug, Clone)]
pub struct RouteRegistration {
    pub method: HttpMethod,
    /// Path in `:name` syntax, relative to the base path
    pub route_path: String,
    /// Path in `{name}` syntax, as keyed in the document
    pub doc_path: String,
    /// Compiled request checks, shared with every request handler
    pub rules: Arc<ParameterRules>,
}

/// Where the host framework serves the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentUrls<'a> {
    pub json: &'a str,
    pub yaml: &'a str,
    /// Whether serving is enabled at all
    pub enabled: bool,
}

/// Finished, immutable document plus the per-route data built alongside it.
#[derive(Debug, Clone)]
pub struct ApiDocument {
    swagger: Swagger,
    config: DocConfig,
    routes: Vec<RouteRegistration>,
    cors: Option<CorsTable>,
}

impl ApiDocument {
    pub(crate) fn new(
        swagger: Swagger,
        config: DocConfig,
        routes: Vec<RouteRegistration>,
        cors: Option<CorsTable>,
    ) -> Self {
        Self {
            swagger,
            config,
            routes,
            cors,
        }
    }

    #[must_use]
    pub fn swagger(&self) -> &Swagger {
        &self.swagger
    }

    #[must_use]
    pub fn config(&self) -> &DocConfig {
        &self.config
    }

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.swagger)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.swagger)
    }

    /// Copy of the document with `host` set, e.g. from the request's `Host`
    /// header.
    #[must_use]
    pub fn with_host(&self, host: impl Into<String>) -> Self {
        let mut document = self.clone();
        document.swagger.host = Some(host.into());
        document
    }

    #[must_use]
    pub fn document_urls(&self) -> DocumentUrls<'_> {
        DocumentUrls {
            json: &self.config.api_document_url,
            yaml: &self.config.yaml_api_document_url,
            enabled: self.config.open_api_document_url,
        }
    }

    /// Registered routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[RouteRegistration] {
        &self.routes
    }

    /// Registration of (path, method). `path` may use either placeholder
    /// syntax.
    #[must_use]
    pub fn route(&self, path: &str, method: HttpMethod) -> Option<&RouteRegistration> {
        let route_path = to_route_path(path).ok()?;
        self.routes
            .iter()
            .find(|r| r.method == method && r.route_path == route_path)
    }

    /// CORS policy of (path, method), when CORS is enabled.
    ///
    /// `OPTIONS` answers for every method registered on the path.
    #[must_use]
    pub fn cors(&self, path: &str, method: HttpMethod) -> Option<AccessControlAllow> {
        let route_path = to_route_path(path).ok()?;
        self.cors.as_ref()?.get(&route_path, method)
    }

    /// Paths that need a preflight handler.
    pub fn preflight_paths(&self) -> impl Iterator<Item = &str> {
        self.cors.iter().flat_map(CorsTable::paths)
    }
}
