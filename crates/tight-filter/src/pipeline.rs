//! Left-to-right application of a filter chain.

use crate::error::FilterError;
use crate::registry::FilterRegistry;
use crate::types::{assert_arity, FilterCall, FilterCtx};
use crate::util::coerce_null;
use serde_json::Value;

/// Run `value` through `chain`.
///
/// - A missing or `null` running value is replaced with `""` before every
///   filter, and the final result is coerced the same way.
/// - An unregistered filter name fails with `UnknownFilter`.
/// - A wrong number of arguments fails with `ArgumentCount`.
/// - An error returned by a filter is wrapped in `Execution`.
///
/// # Example
///
/// ```
/// use tight_filter::{apply, FilterCall, FilterCtx, FilterRegistry};
/// use serde_json::json;
///
/// let registry = FilterRegistry::with_defaults();
/// let chain = vec![
///     FilterCall::new("upcase"),
///     FilterCall::with_args("replace", ["A", "B"]),
/// ];
/// let out = apply(&registry, &chain, Some(json!("cat")), &mut FilterCtx::detached()).unwrap();
/// assert_eq!(out, json!("CBT"));
/// ```
pub fn apply(
    registry: &FilterRegistry,
    chain: &[FilterCall],
    value: Option<Value>,
    ctx: &mut FilterCtx<'_>,
) -> Result<Value, FilterError> {
    let mut value = value.unwrap_or(Value::Null);
    for call in chain {
        value = coerce_null(value);
        let def = registry
            .get(&call.name)
            .ok_or_else(|| FilterError::UnknownFilter(call.name.clone()))?;
        assert_arity(&def.name, &def.arity, call.args.len())?;
        value = (def.apply)(ctx, value, &call.args).map_err(|e| FilterError::Execution {
            name: call.name.clone(),
            source: Box::new(e),
        })?;
    }
    Ok(coerce_null(value))
}
