//! Raw request data handed to the rule engine by the host framework.
//!
//! The rule engine only reads through [`ParamSource`]. [`RequestParts`] is a
//! ready-made implementation that can be filled from an `http::Request`, a raw
//! path with query string, and an urlencoded form body.

use smallvec::SmallVec;
use std::sync::Arc;
use tracing::debug;

/// Maximum number of parameters per carrier before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Stack-allocated parameter storage for the common case.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Read access to the raw parameter values of one request.
pub trait ParamSource {
    /// Header value by name, case-insensitive.
    fn header(&self, name: &str) -> Option<&str>;
    /// Value of a matched path placeholder.
    fn path_param(&self, name: &str) -> Option<&str>;
    fn query_param(&self, name: &str) -> Option<&str>;
    fn form_value(&self, name: &str) -> Option<&str>;
}

/// Request parameters split by carrier.
///
/// Lookups use "last write wins" semantics: when a name occurs more than once,
/// the last occurrence is returned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParts {
    pub path_params: ParamVec,
    /// Header names are stored lowercase
    pub headers: ParamVec,
    pub query_params: ParamVec,
    pub form: ParamVec,
}

fn last_value<'a>(params: &'a ParamVec, name: &str) -> Option<&'a str> {
    params
        .iter()
        .rfind(|(k, _)| k.as_ref() == name)
        .map(|(_, v)| v.as_str())
}

impl RequestParts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a request target such as `/books?limit=10`.
    #[must_use]
    pub fn from_uri(target: &str) -> Self {
        Self {
            query_params: parse_query_params(target),
            ..Self::default()
        }
    }

    /// Copy headers and query parameters out of an `http::Request`.
    ///
    /// Header values that are not valid UTF-8 are skipped.
    #[must_use]
    pub fn from_http<B>(req: &http::Request<B>) -> Self {
        let headers: ParamVec = req
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (Arc::from(name.as_str()), v.to_string()))
            })
            .collect();
        let query_params = req
            .uri()
            .query()
            .map(parse_urlencoded)
            .unwrap_or_default();
        debug!(
            header_count = headers.len(),
            query_count = query_params.len(),
            "request parts extracted"
        );
        Self {
            headers,
            query_params,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_path_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.path_params.push((Arc::from(name), value.into()));
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .push((Arc::from(name.to_ascii_lowercase().as_str()), value.into()));
        self
    }

    #[must_use]
    pub fn with_query_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query_params.push((Arc::from(name), value.into()));
        self
    }

    #[must_use]
    pub fn with_form_value(mut self, name: &str, value: impl Into<String>) -> Self {
        self.form.push((Arc::from(name), value.into()));
        self
    }

    /// Append the fields of an `application/x-www-form-urlencoded` body.
    #[must_use]
    pub fn with_form_body(mut self, body: &[u8]) -> Self {
        self.form.extend(
            url::form_urlencoded::parse(body).map(|(k, v)| (Arc::<str>::from(&*k), v.into_owned())),
        );
        self
    }
}

impl ParamSource for RequestParts {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rfind(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn path_param(&self, name: &str) -> Option<&str> {
        last_value(&self.path_params, name)
    }

    fn query_param(&self, name: &str) -> Option<&str> {
        last_value(&self.query_params, name)
    }

    fn form_value(&self, name: &str) -> Option<&str> {
        last_value(&self.form, name)
    }
}

/// Parse query string parameters from a request target.
///
/// Everything after the first `?` is URL-decoded. A target without a query
/// yields no parameters.
#[must_use]
pub fn parse_query_params(target: &str) -> ParamVec {
    match target.split_once('?') {
        Some((_, query)) => parse_urlencoded(query),
        None => ParamVec::new(),
    }
}

fn parse_urlencoded(query: &str) -> ParamVec {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (Arc::<str>::from(&*k), v.into_owned()))
        .collect()
}
