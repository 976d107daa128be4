//! Built-in filters.

pub mod array;
pub mod dom;
pub mod string;

use crate::types::FilterDefinition;

/// All built-in filters, in registration order.
pub fn all_filters() -> Vec<FilterDefinition> {
    let mut filters = Vec::new();
    filters.extend(dom::filters());
    filters.extend(string::filters());
    filters.extend(array::filters());
    filters
}
