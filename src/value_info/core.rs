use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::FormatError;
use super::format::{
    check_enum_format, check_limit_format, compare_min_max, parse_int, parse_number, parse_uint,
};
use super::ValueKind;
use crate::parameter::ParameterLocation;
use crate::swagger;

/// Declared type and constraints of one parameter, header or record field.
///
/// `enumeration`, `min` and `max` hold the declared literals as strings. They
/// are validated against `kind` by [`ValueInfo::check`] at registration time
/// and parsed again when rules are compiled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueInfo {
    #[serde(rename = "type")]
    pub kind: ValueKind,
    /// Space separated list of allowed literals
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl ValueInfo {
    #[must_use]
    pub fn new(kind: ValueKind) -> Self {
        Self {
            kind,
            enumeration: None,
            min: None,
            max: None,
            required: false,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_enum(mut self, enumeration: impl Into<String>) -> Self {
        self.enumeration = Some(enumeration.into());
        self
    }

    #[must_use]
    pub fn with_min(mut self, min: impl Into<String>) -> Self {
        self.min = Some(min.into());
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: impl Into<String>) -> Self {
        self.max = Some(max.into());
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declared enum literal list, ignoring blank declarations.
    #[must_use]
    pub fn enum_literals(&self) -> Option<&str> {
        non_blank(&self.enumeration)
    }

    #[must_use]
    pub fn min_literal(&self) -> Option<&str> {
        non_blank(&self.min)
    }

    #[must_use]
    pub fn max_literal(&self) -> Option<&str> {
        non_blank(&self.max)
    }

    #[must_use]
    pub fn has_enum(&self) -> bool {
        self.enum_literals().is_some()
    }

    #[must_use]
    pub fn has_min(&self) -> bool {
        self.min_literal().is_some()
    }

    #[must_use]
    pub fn has_max(&self) -> bool {
        self.max_literal().is_some()
    }

    /// Validate the declaration against the capability matrix of its kind.
    ///
    /// Checks run in order: enum format, enum/bound exclusion, bound formats,
    /// then `max > min`.
    pub fn check(&self) -> Result<(), FormatError> {
        if let Some(enumeration) = self.enum_literals() {
            check_enum_format(self.kind, enumeration)?;
            if self.has_min() {
                return Err(FormatError::EnumWithMin);
            }
            if self.has_max() {
                return Err(FormatError::EnumWithMax);
            }
        }

        let min = self.min_literal();
        let max = self.max_literal();
        if let Some(min) = min {
            check_limit_format(self.kind, "minimum", min)?;
        }
        if let Some(max) = max {
            check_limit_format(self.kind, "maximum", max)?;
        }
        if let (Some(min), Some(max)) = (min, max) {
            compare_min_max(self.kind, min, max)?;
        }
        Ok(())
    }

    /// [`check`](Self::check) plus the carrier rule for `file`.
    pub fn check_in(&self, location: ParameterLocation) -> Result<(), FormatError> {
        if self.kind == ValueKind::File && location != ParameterLocation::FormData {
            return Err(FormatError::FileNotInFormData { location });
        }
        self.check()
    }

    /// Enum literals typed as JSON values: integers for numeric kinds,
    /// strings otherwise.
    pub fn enum_values(&self) -> Result<Vec<Value>, FormatError> {
        let Some(enumeration) = self.enum_literals() else {
            return Ok(Vec::new());
        };
        let kind = self.kind;
        enumeration
            .split_whitespace()
            .map(|token| {
                let invalid = |reason| FormatError::InvalidEnumValue {
                    kind,
                    value: token.to_string(),
                    reason,
                };
                if kind.is_int() {
                    parse_int(kind, token).map(Value::from).map_err(invalid)
                } else if kind.is_uint() {
                    parse_uint(kind, token).map(Value::from).map_err(invalid)
                } else {
                    Ok(Value::String(token.to_string()))
                }
            })
            .collect()
    }

    /// Parsed lower bound, if declared.
    pub fn minimum(&self) -> Result<Option<f64>, FormatError> {
        self.bound("minimum", self.min_literal())
    }

    /// Parsed upper bound, if declared.
    pub fn maximum(&self) -> Result<Option<f64>, FormatError> {
        self.bound("maximum", self.max_literal())
    }

    fn bound(&self, bound: &'static str, literal: Option<&str>) -> Result<Option<f64>, FormatError> {
        let Some(literal) = literal else {
            return Ok(None);
        };
        parse_number(self.kind, literal)
            .map(|n| Some(n.as_f64()))
            .map_err(|reason| FormatError::InvalidLimit {
                bound,
                kind: self.kind,
                value: literal.to_string(),
                reason,
            })
    }

    /// Render as a Swagger parameter carried in `location`.
    ///
    /// Path parameters are always marked required.
    pub fn to_swagger_parameter(
        &self,
        name: &str,
        location: ParameterLocation,
    ) -> Result<swagger::Parameter, FormatError> {
        self.check_in(location)?;
        Ok(swagger::Parameter {
            name: name.to_string(),
            location: Some(location),
            description: self.description.clone(),
            required: self.required || location == ParameterLocation::Path,
            kind: Some(self.kind.swagger_type().to_string()),
            format: self.kind.swagger_format().map(str::to_string),
            enumeration: self.enum_values()?,
            minimum: self.minimum()?,
            maximum: self.maximum()?,
            ..Default::default()
        })
    }

    /// Render as a Swagger response header.
    pub fn to_swagger_header(&self) -> Result<swagger::Header, FormatError> {
        if self.kind == ValueKind::File {
            return Err(FormatError::FileInHeader);
        }
        self.check()?;
        Ok(swagger::Header {
            description: self.description.clone(),
            kind: self.kind.swagger_type().to_string(),
            format: self.kind.swagger_format().map(str::to_string),
            enumeration: self.enum_values()?,
            minimum: self.minimum()?,
            maximum: self.maximum()?,
        })
    }
}
