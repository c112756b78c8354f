//! # restdoc
//!
//! **restdoc** builds a [Swagger 2.0](https://swagger.io/specification/v2/) document from
//! typed API declarations, and turns the same declarations into request-time parameter checks.
//!
//! ## Overview
//!
//! An operation is declared once, with its parameters, request body and responses. Record
//! types used as payloads derive [`Describe`], which exposes their fields and `#[api(...)]`
//! metadata without runtime reflection. Registering the declaration on a
//! [`DocumentBuilder`](document::DocumentBuilder) renders the operation, collects the
//! definitions of every reachable record, and compiles the parameter constraints into
//! [`ParameterRules`](rules::ParameterRules) the host framework runs against each request.
//!
//! ## Architecture
//!
//! - **[`value_info`]** - Declared type and constraints of one value, and their format checks
//! - **[`reflect`]** - Static type descriptions and the struct introspector
//! - **[`parameter`]** - Parameter declarations per carrier (path, header, query, formData)
//! - **[`api_doc`]** - Operation declarations and their conversion to Swagger fragments
//! - **[`document`]** - Document assembly, global parameters and route registrations
//! - **[`rules`]** - Request-time parameter validation
//! - **[`request`]** - Raw request data read by the rules
//! - **[`cors`]** - Per-route CORS bookkeeping
//! - **[`swagger`]** - Swagger 2.0 serde model
//! - **[`config`]** / **[`logging`]** / **[`cli`]** - Configuration, tracing setup and the binary
//!
//! ### Registration Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as Host framework
//!     participant Builder as DocumentBuilder
//!     participant Doc as ApiDoc
//!     participant Reflect as StructDocCreator
//!     participant Rules as rules::compile_rules
//!
//!     Host->>Builder: get("/books/:id", doc)
//!     Builder->>Doc: set_method(GET)
//!     Builder->>Doc: to_swagger_operation()
//!     Builder->>Builder: resolve $refs, check path placeholders
//!     Builder->>Doc: to_swagger_definitions()
//!     Doc->>Reflect: get_struct_doc(model)
//!     Reflect-->>Doc: StructDocs
//!     Builder->>Rules: compile_rules(doc.parameters())
//!     Rules-->>Builder: ParameterRules
//!     Builder-->>Host: &RouteRegistration
//! ```
//!
//! ## Example
//!
//! ```rust
//! use restdoc::api_doc::{ApiDocCommon, Model, Response};
//! use restdoc::config::DocConfig;
//! use restdoc::document::DocumentBuilder;
//! use restdoc::parameter::Parameter;
//! use restdoc::request::RequestParts;
//! use restdoc::value_info::{ValueInfo, ValueKind};
//! use restdoc::Describe;
//!
//! #[derive(Describe)]
//! pub struct Book {
//!     /// Unique id
//!     pub id: i64,
//!     #[api(json = "title")]
//!     pub name: String,
//! }
//!
//! let mut builder = DocumentBuilder::new(DocConfig::default()).unwrap();
//! let route = builder
//!     .get(
//!         "/books/:id",
//!         ApiDocCommon::new()
//!             .parameter(
//!                 "id",
//!                 Parameter::in_path(ValueInfo::new(ValueKind::Int64).with_min("1")),
//!             )
//!             .response(200, Response::new("the book").with_model(Model::of::<Book>())),
//!     )
//!     .unwrap();
//!
//! let rules = route.rules.clone();
//! assert!(rules.check(&RequestParts::new().with_path_param("id", "0")).is_err());
//!
//! let document = builder.finish();
//! assert!(document.swagger().definitions.contains_key("Book"));
//! ```

extern crate self as restdoc;

pub mod api_doc;
pub mod cli;
pub mod config;
pub mod cors;
pub mod document;
pub mod logging;
pub mod method;
pub mod parameter;
pub mod path;
pub mod reflect;
pub mod request;
pub mod rules;
pub mod swagger;
pub mod value_info;

pub use api_doc::{ApiDoc, ApiDocCommon, DocError, Model, RegistrationError, RequestBody, Response};
pub use config::DocConfig;
pub use document::{ApiDocument, DocumentBuilder, RouteRegistration};
pub use method::HttpMethod;
pub use parameter::{Parameter, ParameterLocation};
pub use reflect::Describe;
pub use request::{ParamSource, RequestParts};
pub use restdoc_macros::Describe;
pub use rules::{ParameterError, ParameterRules};
pub use value_info::{ValueInfo, ValueKind};
