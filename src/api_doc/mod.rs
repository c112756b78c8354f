//! # API Doc Module
//!
//! Declarations of individual operations and their conversion into Swagger
//! fragments.
//!
//! An [`ApiDoc`] is everything the document builder needs from a declared
//! operation. It is converted once, at registration time, into an
//! [`Operation`](crate::swagger::Operation) and a [`Definitions`] fragment.
//! The same declaration also feeds [`compile_rules`](crate::rules::compile_rules)
//! through [`ApiDoc::parameters`].
//!
//! ## Declaration rules
//!
//! - formData parameters and a request body are mutually exclusive
//! - GET operations carry neither formData parameters nor a request body
//! - a declared request body must name a model
//!
//! Models are referenced by `$ref` and never inlined. Every record reachable
//! from the request or response models lands in the definitions fragment.

mod common;
mod definitions;
mod error;
mod model;
#[cfg(test)]
mod tests;

pub use common::ApiDocCommon;
pub use definitions::{definitions_from_struct_docs, Definition, Definitions};
pub use error::{DocError, RegistrationError};
pub use model::{Model, RequestBody, Response};

use std::collections::BTreeMap;

use crate::method::HttpMethod;
use crate::parameter::Parameter;
use crate::swagger::Operation;

/// Contract between a declared operation and the document builder.
pub trait ApiDoc {
    /// Validate the declaration and render it as an operation.
    fn to_swagger_operation(&self) -> Result<Operation, DocError>;

    /// Definitions for every record reachable from the declared models.
    fn to_swagger_definitions(&self) -> Result<Definitions, DocError>;

    /// Declared parameters by name. Global parameters are referenced from
    /// the operation as `$ref` entries and are not part of this map.
    fn parameters(&self) -> &BTreeMap<String, Parameter>;

    /// Record the method the operation is registered under.
    fn set_method(&mut self, method: HttpMethod);
}
