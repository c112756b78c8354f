//! # Parameter Rules
//!
//! Request-time enforcement of declared parameter constraints.
//!
//! Each declared slot is compiled once, at registration, into a
//! [`ParameterRule`]. A registered operation keeps its rules in a
//! [`ParameterRules`] list and the host framework runs them against every
//! incoming request through [`ParamSource`](crate::request::ParamSource).
//!
//! | kind | rule | checks |
//! |------|------|--------|
//! | string | [`StringRule`] | presence, enum |
//! | int, int32, int64 | [`IntRule`] | presence, parse at width, enum, bounds |
//! | uint, uint32, uint64 | [`UintRule`] | presence, parse at width, enum, bounds |
//! | float32, float64 | [`FloatRule`] | presence, parse at width, bounds |
//! | bool | [`BoolRule`] | presence, parse |
//! | file | none | |
//!
//! An absent or empty optional value always passes.
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use restdoc::parameter::Parameter;
//! use restdoc::request::RequestParts;
//! use restdoc::rules::compile_rules;
//! use restdoc::value_info::{ValueInfo, ValueKind};
//!
//! let mut params = BTreeMap::new();
//! params.insert(
//!     "page".to_string(),
//!     Parameter::in_query(ValueInfo::new(ValueKind::Int32).with_min("1")),
//! );
//! let rules = compile_rules(&params).unwrap();
//! assert!(rules.check(&RequestParts::from_uri("/books?page=2")).is_ok());
//! assert!(rules.check(&RequestParts::from_uri("/books?page=0")).is_err());
//! ```

mod core;
mod error;
#[cfg(test)]
mod tests;

pub use self::core::{
    compile_rule, compile_rules, BoolRule, FloatRule, IntRule, ParameterRule, ParameterRules,
    RuleBase, StringRule, UintRule,
};
pub use error::ParameterError;
