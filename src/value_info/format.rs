//! Pure format checks for declared (not runtime) values.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::FormatError;
use super::ValueKind;

static NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]*$").expect("name format regex should be valid")
});

/// Check that `name` starts with an English letter and only holds letters,
/// digits, `_` and `-`.
pub fn check_name_format(name: &str) -> Result<(), FormatError> {
    if NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(FormatError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Check a whitespace separated enum literal list against `kind`.
///
/// Strings accept any token. Signed and unsigned integers must parse at the
/// declared bit width. Every other kind rejects enums outright.
pub fn check_enum_format(kind: ValueKind, enumeration: &str) -> Result<(), FormatError> {
    if kind == ValueKind::String {
        return Ok(());
    }
    if !kind.is_int() && !kind.is_uint() {
        return Err(FormatError::EnumNotSupported { kind });
    }
    for token in enumeration.split_whitespace() {
        let parsed = if kind.is_int() {
            parse_int(kind, token).map(drop)
        } else {
            parse_uint(kind, token).map(drop)
        };
        parsed.map_err(|reason| FormatError::InvalidEnumValue {
            kind,
            value: token.to_string(),
            reason,
        })?;
    }
    Ok(())
}

/// Check that a single `min`/`max` bound parses as `kind`.
pub fn check_limit_format(
    kind: ValueKind,
    bound: &'static str,
    value: &str,
) -> Result<(), FormatError> {
    if !kind.is_numeric() {
        return Err(FormatError::LimitNotSupported { kind });
    }
    parse_number(kind, value)
        .map(drop)
        .map_err(|reason| FormatError::InvalidLimit {
            bound,
            kind,
            value: value.to_string(),
            reason,
        })
}

/// Require `max` to be strictly greater than `min`.
///
/// Equal bounds are rejected.
pub fn compare_min_max(kind: ValueKind, min: &str, max: &str) -> Result<(), FormatError> {
    let lo = parse_number(kind, min).map_err(|reason| FormatError::InvalidLimit {
        bound: "minimum",
        kind,
        value: min.to_string(),
        reason,
    })?;
    let hi = parse_number(kind, max).map_err(|reason| FormatError::InvalidLimit {
        bound: "maximum",
        kind,
        value: max.to_string(),
        reason,
    })?;
    let greater = match (lo, hi) {
        (Number::Int(lo), Number::Int(hi)) => hi > lo,
        (Number::Uint(lo), Number::Uint(hi)) => hi > lo,
        (lo, hi) => hi.as_f64() > lo.as_f64(),
    };
    if greater {
        Ok(())
    } else {
        Err(FormatError::MaxNotGreater {
            min: min.to_string(),
            max: max.to_string(),
        })
    }
}

/// A number parsed at its declared kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl Number {
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(v) => v as f64,
            Number::Uint(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

/// Parse a signed integer at the declared width of `kind`.
pub fn parse_int(kind: ValueKind, value: &str) -> Result<i64, String> {
    if kind.bit_size() == 32 {
        value
            .parse::<i32>()
            .map(i64::from)
            .map_err(|e| e.to_string())
    } else {
        value.parse::<i64>().map_err(|e| e.to_string())
    }
}

/// Parse an unsigned integer at the declared width of `kind`.
pub fn parse_uint(kind: ValueKind, value: &str) -> Result<u64, String> {
    if value.starts_with('+') {
        return Err("invalid digit found in string".to_string());
    }
    if kind.bit_size() == 32 {
        value
            .parse::<u32>()
            .map(u64::from)
            .map_err(|e| e.to_string())
    } else {
        value.parse::<u64>().map_err(|e| e.to_string())
    }
}

/// Parse a float at the declared width of `kind`.
///
/// Infinite and NaN values are rejected, as are finite values outside the
/// `f32` range when `kind` is 32 bits wide.
pub fn parse_float(kind: ValueKind, value: &str) -> Result<f64, String> {
    let parsed = value.parse::<f64>().map_err(|e| e.to_string())?;
    if !parsed.is_finite() {
        return Err("value out of range".to_string());
    }
    if kind.bit_size() == 32 && parsed.abs() > f64::from(f32::MAX) {
        return Err("value out of range".to_string());
    }
    Ok(parsed)
}

/// Parse any numeric kind.
pub fn parse_number(kind: ValueKind, value: &str) -> Result<Number, String> {
    if kind.is_int() {
        parse_int(kind, value).map(Number::Int)
    } else if kind.is_uint() {
        parse_uint(kind, value).map(Number::Uint)
    } else if kind.is_float() {
        parse_float(kind, value).map(Number::Float)
    } else {
        Err(format!("{kind} is not a numeric type"))
    }
}

/// Parse a boolean literal.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(value: &str) -> Result<bool, String> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err("invalid syntax".to_string()),
    }
}
