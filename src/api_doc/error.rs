use crate::cors::CorsError;
use crate::method::HttpMethod;
use crate::reflect::ReflectError;
use crate::value_info::FormatError;

/// Declaration error raised while converting an API doc into its Swagger form.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocError {
    #[error("there are parameters in formData, the Request should be nil")]
    FormDataWithRequest,
    #[error("in method GET, formData parameters are not allowed")]
    FormDataInGet,
    #[error("the Request model should not be nil")]
    RequestModelMissing,
    #[error("in method GET, the Request should be nil")]
    RequestInGet,
    /// A declared parameter failed its format checks
    #[error("in the parameter {name}, {source}")]
    Parameter { name: String, source: FormatError },
    /// A declared response header failed its format checks
    #[error("in the response {status} header {header}, {source}")]
    ResponseHeader {
        status: u16,
        header: String,
        source: FormatError,
    },
    /// Placeholders of the path with no matching path parameter
    #[error("missing parameters {} in the api doc", .0.join(", "))]
    MissingInDoc(Vec<String>),
    /// Path parameters with no matching placeholder in the path
    #[error("missing parameters {} in the url path", .0.join(", "))]
    MissingInPath(Vec<String>),
    #[error("path {path} is not supported, wildcard segments cannot be documented")]
    WildcardPath { path: String },
    #[error("the ref {reference} is not found")]
    RefNotFound { reference: String },
    #[error("invalid global parameter {name}, it must be carried in exactly one location")]
    InvalidGlobalParameter { name: String },
    /// A replacement global table drops a name registered operations refer to
    #[error("global parameter {name} is still referenced by {method} {path}")]
    GlobalParameterInUse {
        name: String,
        method: HttpMethod,
        path: String,
    },
    /// Two distinct record types share one definition name
    #[error("definition {name} is declared by both {first} and {second}")]
    DefinitionConflict {
        name: String,
        first: String,
        second: String,
    },
    #[error("operation {method} {path} is already registered")]
    DuplicateOperation { method: HttpMethod, path: String },
    #[error(transparent)]
    Cors(#[from] CorsError),
    #[error(transparent)]
    Reflect(#[from] ReflectError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Failure to register one operation, carrying the route it was declared on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{method} {path}: {source}")]
pub struct RegistrationError {
    pub method: HttpMethod,
    pub path: String,
    pub source: DocError,
}
