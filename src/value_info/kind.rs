use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::FormatError;

/// Scalar kind of a declared parameter, header or record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Int,
    Int32,
    Int64,
    Uint,
    Uint32,
    Uint64,
    Float32,
    Float64,
    Bool,
    /// Uploaded file, only valid for formData parameters.
    File,
}

impl ValueKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Int => "int",
            ValueKind::Int32 => "int32",
            ValueKind::Int64 => "int64",
            ValueKind::Uint => "uint",
            ValueKind::Uint32 => "uint32",
            ValueKind::Uint64 => "uint64",
            ValueKind::Float32 => "float32",
            ValueKind::Float64 => "float64",
            ValueKind::Bool => "bool",
            ValueKind::File => "file",
        }
    }

    /// Declared bit width used when parsing numbers of this kind.
    ///
    /// `int` and `uint` are 32 bits wide. Non-numeric kinds report 0.
    #[must_use]
    pub fn bit_size(&self) -> u32 {
        match self {
            ValueKind::Int | ValueKind::Int32 => 32,
            ValueKind::Uint | ValueKind::Uint32 => 32,
            ValueKind::Float32 => 32,
            ValueKind::Int64 | ValueKind::Uint64 | ValueKind::Float64 => 64,
            ValueKind::String | ValueKind::Bool | ValueKind::File => 0,
        }
    }

    #[must_use]
    pub fn is_int(&self) -> bool {
        matches!(self, ValueKind::Int | ValueKind::Int32 | ValueKind::Int64)
    }

    #[must_use]
    pub fn is_uint(&self) -> bool {
        matches!(self, ValueKind::Uint | ValueKind::Uint32 | ValueKind::Uint64)
    }

    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, ValueKind::Float32 | ValueKind::Float64)
    }

    /// Kinds accepting `min`/`max` bounds.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.is_int() || self.is_uint() || self.is_float()
    }

    /// Swagger `type` keyword for this kind.
    #[must_use]
    pub fn swagger_type(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Bool => "boolean",
            ValueKind::File => "file",
            ValueKind::Float32 | ValueKind::Float64 => "number",
            _ => "integer",
        }
    }

    /// Swagger `format` keyword for this kind, if it has one.
    #[must_use]
    pub fn swagger_format(&self) -> Option<&'static str> {
        match self {
            ValueKind::Int | ValueKind::Int32 | ValueKind::Uint | ValueKind::Uint32 => {
                Some("int32")
            }
            ValueKind::Int64 | ValueKind::Uint64 => Some("int64"),
            ValueKind::Float32 => Some("float"),
            ValueKind::Float64 => Some("double"),
            ValueKind::String | ValueKind::Bool | ValueKind::File => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "string" => ValueKind::String,
            "int" => ValueKind::Int,
            "int32" => ValueKind::Int32,
            "int64" => ValueKind::Int64,
            "uint" => ValueKind::Uint,
            "uint32" => ValueKind::Uint32,
            "uint64" => ValueKind::Uint64,
            "float32" => ValueKind::Float32,
            "float64" => ValueKind::Float64,
            "bool" => ValueKind::Bool,
            "file" => ValueKind::File,
            other => {
                return Err(FormatError::UnsupportedKind {
                    kind: other.to_string(),
                })
            }
        })
    }
}
