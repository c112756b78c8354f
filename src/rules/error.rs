use crate::parameter::ParameterLocation;
use crate::value_info::ValueKind;

/// Request-time validation failure.
///
/// Returned to the host framework, which decides what the client sees.
/// `UnsupportedLocation` is the exception: it signals a broken declaration
/// rather than a bad request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    /// Required parameter absent or empty
    #[error("missing parameter {name}")]
    Missing {
        name: String,
        location: ParameterLocation,
    },
    #[error("parameter {name} in {location} is not supported")]
    UnsupportedLocation {
        name: String,
        location: ParameterLocation,
    },
    #[error("parameter {name}: enum invalid ({value})")]
    InvalidEnum { name: String, value: String },
    #[error("parameter {name}: {value} less than the minimum")]
    BelowMinimum { name: String, value: String },
    #[error("parameter {name}: {value} greater than the maximum")]
    AboveMaximum { name: String, value: String },
    /// Value does not parse as the declared kind
    #[error("parameter {name}: {value} is not a valid {kind}: {reason}")]
    Invalid {
        name: String,
        kind: ValueKind,
        value: String,
        reason: String,
    },
}

impl ParameterError {
    /// Name of the parameter that failed.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ParameterError::Missing { name, .. }
            | ParameterError::UnsupportedLocation { name, .. }
            | ParameterError::InvalidEnum { name, .. }
            | ParameterError::BelowMinimum { name, .. }
            | ParameterError::AboveMaximum { name, .. }
            | ParameterError::Invalid { name, .. } => name,
        }
    }

    /// True for declaration problems surfacing at request time.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, ParameterError::UnsupportedLocation { .. })
    }
}
