//! # CORS Module
//!
//! Per-route Cross-Origin Resource Sharing bookkeeping.
//!
//! When the configuration enables `allow_origin`, every registration records
//! its method, the headers its clients may send and the allowed origins for
//! the route path. The `OPTIONS` entry of a path accumulates the union of all
//! methods registered on it, so a preflight answer covers every verb.
//!
//! The table is built once and read-only afterwards. The host framework asks
//! [`ApiDocument::cors`](crate::document::ApiDocument::cors) for the
//! [`AccessControlAllow`] of a route and writes the returned header pairs.

mod error;

pub use error::CorsError;

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::method::HttpMethod;

/// Headers every CORS-enabled route accepts.
pub const DEFAULT_ALLOW_HEADERS: [&str; 7] = [
    "Access-Control-Allow-Origin",
    "Access-Control-Allow-Method",
    "Authorization",
    "Location",
    "Accept",
    "Content-Type",
    "Origin",
];

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";

/// Origin validation strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginValidation {
    /// Exact string matching
    Exact(BTreeSet<String>),
    /// Allow all origins
    Wildcard,
}

impl OriginValidation {
    /// Build from configured origins. An empty list or a `*` entry allows all.
    pub fn from_origins(origins: &[String]) -> Result<Self, CorsError> {
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            return Ok(OriginValidation::Wildcard);
        }
        origins
            .iter()
            .map(|origin| validate_origin(origin).map(|()| origin.clone()))
            .collect::<Result<BTreeSet<_>, _>>()
            .map(OriginValidation::Exact)
    }

    #[must_use]
    pub fn is_allowed(&self, origin: &str) -> bool {
        match self {
            OriginValidation::Exact(origins) => origins.contains(origin),
            OriginValidation::Wildcard => true,
        }
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, OriginValidation::Wildcard)
    }
}

fn validate_origin(origin: &str) -> Result<(), CorsError> {
    let invalid = || CorsError::InvalidOriginFormat {
        origin: origin.to_string(),
    };
    let parsed = url::Url::parse(origin).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid());
    }
    if parsed.origin().ascii_serialization() != origin {
        return Err(invalid());
    }
    Ok(())
}

/// CORS state of one (path, method) pair while routes are being registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsInfo {
    pub methods: BTreeSet<HttpMethod>,
    pub headers: BTreeSet<String>,
}

impl CorsInfo {
    pub fn add_method(&mut self, method: HttpMethod) {
        self.methods.insert(method);
    }

    pub fn add_header(&mut self, header: impl Into<String>) {
        self.headers.insert(header.into());
    }
}

/// Allowed methods, headers and origins of one route, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessControlAllow {
    /// Comma-separated method list
    pub methods: String,
    /// Comma-separated header list
    pub headers: String,
    pub origins: OriginValidation,
    pub credentials: bool,
}

impl AccessControlAllow {
    /// Response headers for a request carrying `origin`.
    ///
    /// A wildcard policy answers `*`. Otherwise the request origin is echoed
    /// back when allowed; a request without an `Origin` header gets no
    /// `Access-Control-Allow-Origin` header at all.
    pub fn allow_headers(
        &self,
        origin: Option<&str>,
    ) -> Result<Vec<(&'static str, String)>, CorsError> {
        let mut headers = vec![
            (ALLOW_METHODS, self.methods.clone()),
            (ALLOW_HEADERS, self.headers.clone()),
        ];
        match (&self.origins, origin) {
            (OriginValidation::Wildcard, _) => headers.push((ALLOW_ORIGIN, "*".to_string())),
            (validation, Some(origin)) if !origin.is_empty() => {
                if !validation.is_allowed(origin) {
                    return Err(CorsError::OriginNotAllowed {
                        origin: origin.to_string(),
                    });
                }
                headers.push((ALLOW_ORIGIN, origin.to_string()));
            }
            _ => {}
        }
        if self.credentials {
            headers.push((ALLOW_CREDENTIALS, "true".to_string()));
        }
        Ok(headers)
    }
}

/// CORS entries keyed by route path, then method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsTable {
    origins: OriginValidation,
    credentials: bool,
    routes: BTreeMap<String, BTreeMap<HttpMethod, CorsInfo>>,
}

impl CorsTable {
    /// # Errors
    ///
    /// Returns `CorsError::WildcardWithCredentials` if `credentials` is set
    /// while every origin is allowed, and `CorsError::InvalidOriginFormat` for
    /// an origin that is not `scheme://host[:port]`.
    pub fn new(origins: &[String], credentials: bool) -> Result<Self, CorsError> {
        let origins = OriginValidation::from_origins(origins)?;
        if credentials && origins.is_wildcard() {
            return Err(CorsError::WildcardWithCredentials);
        }
        Ok(Self {
            origins,
            credentials,
            routes: BTreeMap::new(),
        })
    }

    /// Record `method` on `path`, and on the path's `OPTIONS` entry.
    pub fn register<'a>(
        &mut self,
        path: &str,
        method: HttpMethod,
        headers: impl IntoIterator<Item = &'a str>,
    ) {
        let entries = self.routes.entry(path.to_string()).or_default();
        let extra: Vec<&str> = headers.into_iter().collect();
        for slot in [method, HttpMethod::Options] {
            let info = entries.entry(slot).or_default();
            info.add_method(method);
            for header in DEFAULT_ALLOW_HEADERS.iter().chain(extra.iter()) {
                info.add_header(*header);
            }
        }
        debug!(path, method = %method, "cors entry updated");
    }

    /// Allow policy of (path, method), if anything was registered there.
    #[must_use]
    pub fn get(&self, path: &str, method: HttpMethod) -> Option<AccessControlAllow> {
        let info = self.routes.get(path)?.get(&method)?;
        Some(AccessControlAllow {
            methods: join(info.methods.iter().map(HttpMethod::as_str)),
            headers: join(info.headers.iter().map(String::as_str)),
            origins: self.origins.clone(),
            credentials: self.credentials,
        })
    }

    /// Paths with at least one CORS entry.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(",")
}
