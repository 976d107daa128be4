//! Sequence filters.

use crate::error::FilterError;
use crate::types::{Arity, FilterCtx, FilterDefinition};
use crate::util;
use serde_json::Value;

fn join(_: &mut FilterCtx<'_>, value: Value, args: &[String]) -> Result<Value, FilterError> {
    let items = util::as_array(&value)?;
    let parts: Vec<String> = items.iter().map(util::render).collect();
    Ok(Value::String(parts.join(&args[0])))
}

/// First element of an array, or first character of a string.
fn first(_: &mut FilterCtx<'_>, value: Value, _: &[String]) -> Result<Value, FilterError> {
    Ok(match value {
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        Value::String(s) => s
            .chars()
            .next()
            .map(|c| Value::String(c.to_string()))
            .unwrap_or(Value::Null),
        _ => Value::Null,
    })
}

/// Last element of an array, or last character of a string.
fn last(_: &mut FilterCtx<'_>, value: Value, _: &[String]) -> Result<Value, FilterError> {
    Ok(match value {
        Value::Array(mut items) => items.pop().unwrap_or(Value::Null),
        Value::String(s) => s
            .chars()
            .next_back()
            .map(|c| Value::String(c.to_string()))
            .unwrap_or(Value::Null),
        _ => Value::Null,
    })
}

pub fn filters() -> Vec<FilterDefinition> {
    vec![
        FilterDefinition::new("join", Arity::Fixed(1), join),
        FilterDefinition::new("first", Arity::Fixed(0), first),
        FilterDefinition::new("last", Arity::Fixed(0), last),
    ]
}
