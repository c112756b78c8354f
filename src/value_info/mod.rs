//! # Value Info Module
//!
//! Declared scalar types and their constraints. Every parameter, response
//! header and record field bottoms out in a [`ValueKind`], optionally narrowed
//! by an enum literal list or numeric bounds.
//!
//! ## Capability matrix
//!
//! | kind                    | enum | min/max | carriers                 |
//! |-------------------------|------|---------|--------------------------|
//! | `string`                | yes  | no      | any                      |
//! | `int*`, `uint*`         | yes  | yes     | any                      |
//! | `float32`, `float64`    | no   | yes     | any                      |
//! | `bool`                  | no   | no      | any                      |
//! | `file`                  | no   | no      | formData only            |
//!
//! An enum excludes bounds. When both bounds are present the maximum must be
//! strictly greater than the minimum.
//!
//! ## Example
//!
//! ```rust
//! use restdoc::value_info::{ValueInfo, ValueKind};
//!
//! let page = ValueInfo::new(ValueKind::Int32).with_min("1").with_max("500");
//! assert!(page.check().is_ok());
//!
//! let broken = ValueInfo::new(ValueKind::Int32).with_min("5").with_max("5");
//! assert!(broken.check().is_err());
//! ```

mod core;
mod error;
pub mod format;
mod kind;

pub use self::core::ValueInfo;
pub use error::FormatError;
pub use format::{check_name_format, Number};
pub use kind::ValueKind;
