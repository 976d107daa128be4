use serde::{Deserialize, Serialize};
use tight_binding::BindingSyntax;

use crate::error::Error;

/// Engine configuration.
///
/// Deserializes from camelCase JSON; every field is optional.
///
/// ```
/// use tight::Options;
/// use tight_binding::BindingSyntax;
///
/// let options = Options::from_json(r#"{"bindingAttribute": "data-bind", "syntax": "attribute"}"#).unwrap();
/// assert_eq!(options.binding_attribute, "data-bind");
/// assert_eq!(options.syntax, BindingSyntax::Attribute);
/// assert!(options.default_filters);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Marker attribute holding each element's binding expression.
    pub binding_attribute: String,
    /// Grammar used to parse binding expressions.
    pub syntax: BindingSyntax,
    /// Register the built-in filters on construction.
    pub default_filters: bool,
    /// Maximum nesting of `set` calls made from observers.
    pub max_dispatch_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            binding_attribute: "data-binding".to_string(),
            syntax: BindingSyntax::Auto,
            default_filters: true,
            max_dispatch_depth: 64,
        }
    }
}

impl Options {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_binding_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.binding_attribute = attribute.into();
        self
    }

    pub fn with_syntax(mut self, syntax: BindingSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn without_default_filters(mut self) -> Self {
        self.default_filters = false;
        self
    }

    pub fn with_max_dispatch_depth(mut self, depth: usize) -> Self {
        self.max_dispatch_depth = depth;
        self
    }
}
