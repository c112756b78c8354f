/// CORS configuration or request error.
///
/// `WildcardWithCredentials` and `InvalidOriginFormat` are raised when the
/// document builder is constructed. `OriginNotAllowed` is raised per request
/// by [`AccessControlAllow::allow_headers`](super::AccessControlAllow::allow_headers).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CorsError {
    /// Wildcard origin (`*`) cannot be used with credentials
    #[error(
        "CORS configuration error: Cannot use wildcard origin (*) with credentials. \
         When allow_credentials is true, you must specify exact origins."
    )]
    WildcardWithCredentials,
    /// Origin is not of the form `scheme://host[:port]`
    #[error(
        "CORS configuration error: Invalid origin format '{origin}'. \
         Expected format: scheme://host:port (e.g., https://example.com)"
    )]
    InvalidOriginFormat { origin: String },
    /// Request origin is not in the allow list
    #[error("Origin {origin} is not allowed")]
    OriginNotAllowed { origin: String },
}
