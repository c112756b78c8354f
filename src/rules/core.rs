use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, error, warn};

use super::error::ParameterError;
use crate::api_doc::DocError;
use crate::parameter::{Parameter, ParameterLocation};
use crate::request::ParamSource;
use crate::value_info::format::{parse_bool, parse_float, parse_int, parse_uint};
use crate::value_info::{FormatError, ValueInfo, ValueKind};

/// One executable check compiled from a declared parameter slot.
pub trait ParameterRule: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
    fn location(&self) -> ParameterLocation;
    /// Validate the parameter's value in `source`.
    fn check(&self, source: &dyn ParamSource) -> Result<(), ParameterError>;
}

/// Name, carrier and requiredness shared by every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBase {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
}

impl RuleBase {
    /// Fetch the raw value from its carrier.
    ///
    /// Returns `Ok(None)` for an absent or empty optional value. Every rule
    /// treats that as valid.
    pub fn get_value<'a>(
        &self,
        source: &'a dyn ParamSource,
    ) -> Result<Option<&'a str>, ParameterError> {
        let value = match self.location {
            ParameterLocation::Path => source.path_param(&self.name),
            ParameterLocation::Header => source.header(&self.name),
            ParameterLocation::Query => source.query_param(&self.name),
            ParameterLocation::FormData => source.form_value(&self.name),
            ParameterLocation::Body => {
                return Err(ParameterError::UnsupportedLocation {
                    name: self.name.clone(),
                    location: self.location,
                })
            }
        };
        match value {
            Some(v) if !v.is_empty() => Ok(Some(v)),
            _ if self.required => Err(ParameterError::Missing {
                name: self.name.clone(),
                location: self.location,
            }),
            _ => Ok(None),
        }
    }

    fn invalid(&self, kind: ValueKind, value: &str, reason: String) -> ParameterError {
        ParameterError::Invalid {
            name: self.name.clone(),
            kind,
            value: value.to_string(),
            reason,
        }
    }

    fn bounds<T: PartialOrd>(
        &self,
        value: &str,
        parsed: T,
        min: Option<T>,
        max: Option<T>,
    ) -> Result<(), ParameterError> {
        if min.is_some_and(|min| parsed < min) {
            return Err(ParameterError::BelowMinimum {
                name: self.name.clone(),
                value: value.to_string(),
            });
        }
        if max.is_some_and(|max| parsed > max) {
            return Err(ParameterError::AboveMaximum {
                name: self.name.clone(),
                value: value.to_string(),
            });
        }
        Ok(())
    }

    fn not_in_enum(&self, value: &str) -> ParameterError {
        ParameterError::InvalidEnum {
            name: self.name.clone(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StringRule {
    pub base: RuleBase,
    pub enumeration: Option<BTreeSet<String>>,
}

impl ParameterRule for StringRule {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn location(&self) -> ParameterLocation {
        self.base.location
    }

    fn check(&self, source: &dyn ParamSource) -> Result<(), ParameterError> {
        let Some(value) = self.base.get_value(source)? else {
            return Ok(());
        };
        match &self.enumeration {
            Some(allowed) if !allowed.contains(value) => Err(self.base.not_in_enum(value)),
            _ => Ok(()),
        }
    }
}

/// Signed integer rule, parsing at the declared bit width.
#[derive(Debug, Clone)]
pub struct IntRule {
    pub base: RuleBase,
    pub kind: ValueKind,
    pub enumeration: Option<BTreeSet<i64>>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl ParameterRule for IntRule {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn location(&self) -> ParameterLocation {
        self.base.location
    }

    fn check(&self, source: &dyn ParamSource) -> Result<(), ParameterError> {
        let Some(value) = self.base.get_value(source)? else {
            return Ok(());
        };
        let parsed = parse_int(self.kind, value)
            .map_err(|reason| self.base.invalid(self.kind, value, reason))?;
        if let Some(allowed) = &self.enumeration {
            if !allowed.contains(&parsed) {
                return Err(self.base.not_in_enum(value));
            }
        }
        self.base.bounds(value, parsed, self.min, self.max)
    }
}

/// Unsigned integer rule, parsing at the declared bit width.
#[derive(Debug, Clone)]
pub struct UintRule {
    pub base: RuleBase,
    pub kind: ValueKind,
    pub enumeration: Option<BTreeSet<u64>>,
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl ParameterRule for UintRule {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn location(&self) -> ParameterLocation {
        self.base.location
    }

    fn check(&self, source: &dyn ParamSource) -> Result<(), ParameterError> {
        let Some(value) = self.base.get_value(source)? else {
            return Ok(());
        };
        let parsed = parse_uint(self.kind, value)
            .map_err(|reason| self.base.invalid(self.kind, value, reason))?;
        if let Some(allowed) = &self.enumeration {
            if !allowed.contains(&parsed) {
                return Err(self.base.not_in_enum(value));
            }
        }
        self.base.bounds(value, parsed, self.min, self.max)
    }
}

#[derive(Debug, Clone)]
pub struct FloatRule {
    pub base: RuleBase,
    pub kind: ValueKind,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ParameterRule for FloatRule {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn location(&self) -> ParameterLocation {
        self.base.location
    }

    fn check(&self, source: &dyn ParamSource) -> Result<(), ParameterError> {
        let Some(value) = self.base.get_value(source)? else {
            return Ok(());
        };
        let parsed = parse_float(self.kind, value)
            .map_err(|reason| self.base.invalid(self.kind, value, reason))?;
        self.base.bounds(value, parsed, self.min, self.max)
    }
}

#[derive(Debug, Clone)]
pub struct BoolRule {
    pub base: RuleBase,
}

impl ParameterRule for BoolRule {
    fn name(&self) -> &str {
        &self.base.name
    }

    fn location(&self) -> ParameterLocation {
        self.base.location
    }

    fn check(&self, source: &dyn ParamSource) -> Result<(), ParameterError> {
        let Some(value) = self.base.get_value(source)? else {
            return Ok(());
        };
        parse_bool(value)
            .map(drop)
            .map_err(|reason| self.base.invalid(ValueKind::Bool, value, reason))
    }
}

fn parse_all<T: Ord>(
    info: &ValueInfo,
    parse: impl Fn(ValueKind, &str) -> Result<T, String>,
) -> Result<Option<BTreeSet<T>>, FormatError> {
    let Some(literals) = info.enum_literals() else {
        return Ok(None);
    };
    literals
        .split_whitespace()
        .map(|token| {
            parse(info.kind, token).map_err(|reason| FormatError::InvalidEnumValue {
                kind: info.kind,
                value: token.to_string(),
                reason,
            })
        })
        .collect::<Result<BTreeSet<_>, _>>()
        .map(Some)
}

fn parse_bound<T>(
    info: &ValueInfo,
    bound: &'static str,
    literal: Option<&str>,
    parse: impl Fn(ValueKind, &str) -> Result<T, String>,
) -> Result<Option<T>, FormatError> {
    literal
        .map(|value| {
            parse(info.kind, value).map_err(|reason| FormatError::InvalidLimit {
                bound,
                kind: info.kind,
                value: value.to_string(),
                reason,
            })
        })
        .transpose()
}

/// Compile one declared slot.
///
/// Returns `None` when the slot carries no constraint worth checking: no enum,
/// no bounds, not boolean and not required. `file` slots never produce a rule.
pub fn compile_rule(
    name: &str,
    location: ParameterLocation,
    info: &ValueInfo,
) -> Result<Option<Box<dyn ParameterRule>>, FormatError> {
    info.check_in(location)?;

    let required = info.required || location == ParameterLocation::Path;
    let constrained = info.has_enum()
        || info.has_min()
        || info.has_max()
        || info.kind == ValueKind::Bool
        || required;
    if !constrained {
        return Ok(None);
    }

    let base = RuleBase {
        name: name.to_string(),
        location,
        required,
    };
    let kind = info.kind;
    let rule: Box<dyn ParameterRule> = match kind {
        ValueKind::String => Box::new(StringRule {
            base,
            enumeration: info
                .enum_literals()
                .map(|l| l.split_whitespace().map(str::to_string).collect()),
        }),
        ValueKind::Int | ValueKind::Int32 | ValueKind::Int64 => Box::new(IntRule {
            base,
            kind,
            enumeration: parse_all(info, parse_int)?,
            min: parse_bound(info, "minimum", info.min_literal(), parse_int)?,
            max: parse_bound(info, "maximum", info.max_literal(), parse_int)?,
        }),
        ValueKind::Uint | ValueKind::Uint32 | ValueKind::Uint64 => Box::new(UintRule {
            base,
            kind,
            enumeration: parse_all(info, parse_uint)?,
            min: parse_bound(info, "minimum", info.min_literal(), parse_uint)?,
            max: parse_bound(info, "maximum", info.max_literal(), parse_uint)?,
        }),
        ValueKind::Float32 | ValueKind::Float64 => Box::new(FloatRule {
            base,
            kind,
            min: parse_bound(info, "minimum", info.min_literal(), parse_float)?,
            max: parse_bound(info, "maximum", info.max_literal(), parse_float)?,
        }),
        ValueKind::Bool => Box::new(BoolRule { base }),
        ValueKind::File => return Ok(None),
    };
    Ok(Some(rule))
}

/// Compiled rules of one operation, run in compile order.
#[derive(Debug, Default)]
pub struct ParameterRules {
    rules: Vec<Box<dyn ParameterRule>>,
}

impl ParameterRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: Box<dyn ParameterRule>) {
        self.rules.push(rule);
    }

    /// Append the rules compiled from `parameters`.
    pub fn extend_from(&mut self, parameters: &BTreeMap<String, Parameter>) -> Result<(), DocError> {
        for (name, parameter) in parameters {
            for (location, info) in parameter.slots() {
                let rule = compile_rule(name, location, &info).map_err(|source| {
                    DocError::Parameter {
                        name: name.clone(),
                        source,
                    }
                })?;
                if let Some(rule) = rule {
                    self.rules.push(rule);
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ParameterRule> {
        self.rules.iter().map(|r| &**r as &dyn ParameterRule)
    }

    /// Run every rule, stopping at the first failure.
    pub fn check(&self, source: &dyn ParamSource) -> Result<(), ParameterError> {
        for rule in &self.rules {
            if let Err(err) = rule.check(source) {
                if err.is_configuration_error() {
                    error!(parameter = rule.name(), location = %rule.location(), error = %err, "parameter rule misconfigured");
                } else {
                    warn!(parameter = rule.name(), location = %rule.location(), error = %err, "parameter validation failed");
                }
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Compile every declared parameter, in name order then carrier order.
pub fn compile_rules(parameters: &BTreeMap<String, Parameter>) -> Result<ParameterRules, DocError> {
    let mut rules = ParameterRules::new();
    rules.extend_from(parameters)?;
    debug!(
        parameters = parameters.len(),
        rules = rules.len(),
        "compiled parameter rules"
    );
    Ok(rules)
}
