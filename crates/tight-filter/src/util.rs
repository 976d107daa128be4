//! Value helpers shared by filters and renderers.

use crate::error::FilterError;
use serde_json::{Number, Value};

/// Truthiness of a bound value.
///
/// `false`, `0`, `NaN`, `""`, `null` and a missing value are falsy;
/// everything else, including empty arrays and objects, is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Format a number the way it is shown to users: integral floats lose
/// their fractional part (`2.0` renders as `2`).
pub fn number_text(n: &Number) -> String {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 {
                return format!("{}", f as i128);
            }
        }
    }
    n.to_string()
}

/// Render a value as text content.
///
/// Strings are used verbatim, arrays are joined with `,`, objects are
/// written as compact JSON and `null` renders as the empty string.
pub fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(render).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Render an optional value; a missing value renders as the empty string.
pub fn render_opt(value: Option<&Value>) -> String {
    value.map(render).unwrap_or_default()
}

/// Borrow a string value or fail with `NOT_STRING`.
pub fn as_str(value: &Value) -> Result<&str, FilterError> {
    value.as_str().ok_or(FilterError::NotString)
}

/// Borrow an array value or fail with `NOT_ARRAY`.
pub fn as_array(value: &Value) -> Result<&[Value], FilterError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or(FilterError::NotArray)
}

/// Replace `null` with the empty string.
pub fn coerce_null(value: Value) -> Value {
    if value.is_null() {
        Value::String(String::new())
    } else {
        value
    }
}
