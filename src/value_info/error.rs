use super::ValueKind;
use crate::parameter::ParameterLocation;

/// Declaration format error
///
/// Raised while registering a route when a declared name, enum or bound does
/// not fit the declared kind. These are never recovered from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Name does not match `^[a-zA-Z][a-zA-Z0-9_-]*$`
    #[error("({name}) must start with an English letter and only include English letters, numbers, '_' and '-'")]
    InvalidName {
        /// The offending name
        name: String,
    },
    /// Type name outside the supported scalar set
    #[error("value type {kind} is not supported")]
    UnsupportedKind {
        /// The declared type name
        kind: String,
    },
    /// Enum declared on a kind without enum support
    #[error("{kind} can't set Enum")]
    EnumNotSupported { kind: ValueKind },
    /// Enum token that does not parse as the declared kind
    #[error("enum value {value} is not a valid {kind}: {reason}")]
    InvalidEnumValue {
        kind: ValueKind,
        value: String,
        reason: String,
    },
    /// Min/Max declared on a non-numeric kind
    #[error("{kind} can't set Min/Max")]
    LimitNotSupported { kind: ValueKind },
    /// Bound that does not parse as the declared kind
    #[error("{bound}({value}) is not a valid {kind}: {reason}")]
    InvalidLimit {
        /// `"minimum"` or `"maximum"`
        bound: &'static str,
        kind: ValueKind,
        value: String,
        reason: String,
    },
    #[error("Enum exists, can't set Min")]
    EnumWithMin,
    #[error("Enum exists, can't set Max")]
    EnumWithMax,
    /// Both bounds set with `max <= min`
    #[error("the maximum({max}) must be greater than the minimum({min})")]
    MaxNotGreater { min: String, max: String },
    #[error("file is only supported in formData, not in {location}")]
    FileNotInFormData { location: ParameterLocation },
    #[error("file is not supported in a response header")]
    FileInHeader,
}
