//! Lenient field coercion for inbound JSON.
//!
//! Game clients are not strict about JSON types (ids arrive as strings,
//! coordinates as integers, flags as 0/1), so every inbound field is coerced
//! to its target type instead of being deserialized strictly.

use serde_json::Value;
use thiserror::Error;

/// A field could not be coerced to the requested type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot coerce {found} to {expected}")]
pub struct CoercionError {
    pub expected: &'static str,
    pub found: &'static str,
}

impl CoercionError {
    fn new(expected: &'static str, value: &Value) -> Self {
        Self {
            expected,
            found: kind_of(value),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Integer: JSON integers, floats truncated toward zero, numeric strings, booleans as 0/1
pub fn to_integer(value: &Value) -> Result<i64, CoercionError> {
    let error = || CoercionError::new("integer", value);
    match value {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            let float = number.as_f64().ok_or_else(error)?;
            float_to_integer(float).ok_or_else(error)
        }
        Value::String(text) => text.trim().parse::<i64>().map_err(|_| error()),
        Value::Bool(flag) => Ok(i64::from(*flag)),
        _ => Err(error()),
    }
}

fn float_to_integer(float: f64) -> Option<i64> {
    let truncated = float.trunc();
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

/// Finite float: numbers, numeric strings, booleans as 0/1
pub fn to_float(value: &Value) -> Result<f64, CoercionError> {
    let error = || CoercionError::new("float", value);
    let float = match value {
        Value::Number(number) => number.as_f64().ok_or_else(error)?,
        Value::String(text) => text.trim().parse::<f64>().map_err(|_| error())?,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        _ => return Err(error()),
    };
    if float.is_finite() {
        Ok(float)
    } else {
        Err(error())
    }
}

/// String: strings as-is, numbers rendered as text, booleans as `True` / `False`
pub fn to_text(value: &Value) -> Result<String, CoercionError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(true) => Ok("True".to_string()),
        Value::Bool(false) => Ok("False".to_string()),
        _ => Err(CoercionError::new("string", value)),
    }
}

/// Boolean by truthiness: false, 0, "", null, [] and {} are false
pub fn to_flag(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
