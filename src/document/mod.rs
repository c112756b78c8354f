//! # Document Module
//!
//! Assembles registered operations into one Swagger 2.0 document.
//!
//! [`DocumentBuilder`] owns the document while operations are registered.
//! Each registration:
//!
//! 1. normalises the path into both placeholder syntaxes
//! 2. renders the operation and fills in a default tag
//! 3. resolves global parameter references and checks path placeholders
//! 4. merges the operation's definitions, rejecting name conflicts
//! 5. compiles the request rules and updates the CORS table
//!
//! [`DocumentBuilder::finish`] turns the builder into an immutable
//! [`ApiDocument`] that can be shared across request handlers.

mod api_document;
mod builder;
#[cfg(test)]
mod tests;

pub use api_document::{ApiDocument, DocumentUrls, RouteRegistration};
pub use builder::DocumentBuilder;
