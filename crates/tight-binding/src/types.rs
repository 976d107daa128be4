use serde::{Deserialize, Serialize};
use tight_filter::FilterCall;
use tight_path::Path;

/// Which binding grammar to parse with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BindingSyntax {
    /// `|` selects the filter chain grammar, otherwise `:` selects the
    /// attribute grammar, otherwise the expression is a plain path.
    #[default]
    Auto,
    /// `path | filter: "arg", "arg" | filter`
    FilterChain,
    /// `path:attribute:truthy:falsy`
    Attribute,
}

/// `path | name: "arg" | ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBinding {
    pub property: Path,
    pub filters: Vec<FilterCall>,
}

/// `path[:attribute[:truthy[:falsy]]]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeBinding {
    pub property: Path,
    /// `None` renders the value as content.
    pub target: Option<String>,
    pub truthy: String,
    pub falsy: String,
}

impl AttributeBinding {
    /// True when the attribute is set from the literal pair rather than the
    /// value itself.
    pub fn is_toggle(&self) -> bool {
        !self.truthy.is_empty() || !self.falsy.is_empty()
    }
}

/// A parsed binding expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Filters(FilterBinding),
    Attribute(AttributeBinding),
}

impl Binding {
    /// The store path this binding renders.
    pub fn property(&self) -> &Path {
        match self {
            Binding::Filters(b) => &b.property,
            Binding::Attribute(b) => &b.property,
        }
    }
}
