//! Filters with side effects on the bound element.

use crate::error::FilterError;
use crate::types::{Arity, FilterCtx, FilterDefinition};
use crate::util;
use serde_json::Value;

/// `attr: "name"` sets attribute `name` to the value.
/// `attr: "name", "on", "off"` sets it to `on` or `off` by truthiness.
///
/// Returns the element's current inner HTML so the rendered content is left
/// as it was.
fn attr(ctx: &mut FilterCtx<'_>, value: Value, args: &[String]) -> Result<Value, FilterError> {
    let text = if args.len() == 3 {
        if util::is_truthy(Some(&value)) {
            args[1].clone()
        } else {
            args[2].clone()
        }
    } else {
        util::render(&value)
    };
    let element = ctx.element()?;
    element.set_attribute(&args[0], &text);
    Ok(Value::String(element.inner_html()))
}

pub fn filters() -> Vec<FilterDefinition> {
    vec![FilterDefinition::new("attr", Arity::Range(1, Some(3)), attr)]
}
