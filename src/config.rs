//! # Document Configuration
//!
//! Top-level metadata and behaviour switches of the generated document.
//!
//! A [`DocConfig`] is loaded from a YAML (`.yaml`, `.yml`) or JSON (`.json`)
//! file. Every field is optional; missing fields take the defaults below.
//!
//! ## Environment Variables
//!
//! Applied on top of the file by [`load_config`]:
//!
//! - `RESTDOC_BASE_PATH` replaces `base_path`
//! - `RESTDOC_DOMAIN_NAME` replaces `domain_name`
//! - `RESTDOC_ORIGINS` replaces `origins` (comma-separated)
//!
//! ## Example
//!
//! ```yaml
//! title: Bookstore
//! version: v1.0.0
//! base_path: /apis
//! schemes: [http, https]
//! allow_origin: true
//! origins: ["https://books.example.com"]
//! global_parameters:
//!   token:
//!     inHeader: { type: string, required: true }
//! ```

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::parameter::Parameter;

pub const DEFAULT_API_DOCUMENT_URL: &str = "/docs/swagger.json";
pub const DEFAULT_YAML_API_DOCUMENT_URL: &str = "/docs/swagger.yaml";

pub const ENV_BASE_PATH: &str = "RESTDOC_BASE_PATH";
pub const ENV_DOMAIN_NAME: &str = "RESTDOC_DOMAIN_NAME";
pub const ENV_ORIGINS: &str = "RESTDOC_ORIGINS";

/// Transfer protocol listed in the document's `schemes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
    Ws,
    Wss,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::Ws => "ws",
            Scheme::Wss => "wss",
        };
        f.write_str(s)
    }
}

/// Configuration of one generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocConfig {
    pub title: String,
    pub description: String,
    pub version: String,
    /// Prefix of every path, e.g. `/apis`
    pub base_path: String,
    pub schemes: Vec<Scheme>,
    /// Host written into the document, e.g. `api.example.com:8080`
    pub domain_name: Option<String>,
    /// Enables the CORS table
    pub allow_origin: bool,
    /// Allowed origins; empty means any origin
    pub origins: Vec<String>,
    pub allow_credentials: bool,
    /// Whether the host framework should serve the document
    pub open_api_document_url: bool,
    pub api_document_url: String,
    pub yaml_api_document_url: String,
    /// Parameters shared by reference across operations
    pub global_parameters: BTreeMap<String, Parameter>,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            version: String::new(),
            base_path: String::new(),
            schemes: vec![Scheme::Http],
            domain_name: None,
            allow_origin: false,
            origins: Vec::new(),
            allow_credentials: false,
            open_api_document_url: false,
            api_document_url: DEFAULT_API_DOCUMENT_URL.to_string(),
            yaml_api_document_url: DEFAULT_YAML_API_DOCUMENT_URL.to_string(),
            global_parameters: BTreeMap::new(),
        }
    }
}

impl DocConfig {
    /// Parse a config file, choosing the format by extension.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let config: DocConfig = match extension.as_deref() {
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            _ => bail!(
                "Unsupported config format: {} (expected .yaml, .yml or .json)",
                path.display()
            ),
        };
        Ok(config)
    }

    /// Apply overrides looked up by environment variable name.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(base_path) = lookup(ENV_BASE_PATH) {
            self.base_path = base_path;
        }
        if let Some(domain_name) = lookup(ENV_DOMAIN_NAME) {
            self.domain_name = Some(domain_name).filter(|d| !d.is_empty());
        }
        if let Some(origins) = lookup(ENV_ORIGINS) {
            self.origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Check the values a builder cannot recover from.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.base_path.is_empty() && !self.base_path.starts_with('/') {
            bail!("base_path must start with '/': {}", self.base_path);
        }
        for url in [&self.api_document_url, &self.yaml_api_document_url] {
            if !url.starts_with('/') {
                bail!("document url must start with '/': {url}");
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn scheme_names(&self) -> Vec<String> {
        self.schemes.iter().map(Scheme::to_string).collect()
    }
}

/// Load a config file, apply environment overrides and validate it.
pub fn load_config(path: &Path) -> anyhow::Result<DocConfig> {
    let mut config = DocConfig::from_file(path)?;
    config.apply_env();
    config
        .validate()
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    debug!(
        path = %path.display(),
        title = %config.title,
        globals = config.global_parameters.len(),
        "config loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_info::ValueKind;
    use std::io::Write;
    use tempfile::Builder;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = DocConfig::default();
        assert_eq!(config.api_document_url, "/docs/swagger.json");
        assert_eq!(config.yaml_api_document_url, "/docs/swagger.yaml");
        assert_eq!(config.scheme_names(), vec!["http"]);
        assert!(!config.allow_origin);
    }

    #[test]
    fn test_load_yaml() {
        let file = write_config(
            ".yaml",
            r#"
title: Bookstore
version: v1.0.0
base_path: /apis
schemes: [http, https]
allow_origin: true
origins: ["https://books.example.com"]
global_parameters:
  token:
    inHeader: { type: string, required: true }
"#,
        );
        let config = DocConfig::from_file(file.path()).unwrap();
        assert_eq!(config.title, "Bookstore");
        assert_eq!(config.base_path, "/apis");
        assert_eq!(config.schemes, vec![Scheme::Http, Scheme::Https]);
        assert_eq!(config.api_document_url, DEFAULT_API_DOCUMENT_URL);
        let token = config.global_parameters["token"].in_header.as_ref().unwrap();
        assert_eq!(token.kind, ValueKind::String);
        assert!(token.required);
    }

    #[test]
    fn test_load_json() {
        let file = write_config(".json", r#"{"title": "Bookstore", "allow_credentials": true}"#);
        let config = DocConfig::from_file(file.path()).unwrap();
        assert_eq!(config.title, "Bookstore");
        assert!(config.allow_credentials);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_config(".toml", "title = 'x'");
        let err = DocConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Unsupported config format"));
    }

    #[test]
    fn test_parse_error_has_context() {
        let file = write_config(".yaml", "schemes: [gopher]");
        let err = DocConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse YAML config"));
    }

    #[test]
    fn test_overrides() {
        let mut config = DocConfig::default();
        config.apply_overrides(|name| match name {
            ENV_BASE_PATH => Some("/v2".to_string()),
            ENV_ORIGINS => Some("https://a.io, https://b.io,".to_string()),
            _ => None,
        });
        assert_eq!(config.base_path, "/v2");
        assert_eq!(config.origins, vec!["https://a.io", "https://b.io"]);
        assert_eq!(config.domain_name, None);
    }

    #[test]
    fn test_validate() {
        let mut config = DocConfig::default();
        assert!(config.validate().is_ok());
        config.base_path = "apis".to_string();
        assert!(config.validate().is_err());
        config.base_path = "/apis".to_string();
        config.api_document_url = "swagger.json".to_string();
        assert!(config.validate().is_err());
    }
}
