//! Binding expressions.
//!
//! Elements declare what they render with a short expression in one of two
//! grammars:
//!
//! - filter chain: `model.name | upcase | replace: "A", "B"`
//! - attribute: `model.active:class:on:off`
//!
//! # Example
//!
//! ```
//! use tight_binding::{Binding, BindingParser, BindingSyntax};
//!
//! let binding = BindingParser::parse("model.name | replace: 'a', 'b'", BindingSyntax::Auto).unwrap();
//! let Binding::Filters(chain) = binding else { panic!("expected a filter chain") };
//! assert_eq!(chain.property.to_string(), "model.name");
//! assert_eq!(chain.filters[0].name, "replace");
//! assert_eq!(chain.filters[0].args, vec!["a", "b"]);
//! ```

mod types;
pub use types::*;

mod parser;
pub use parser::{detect_syntax, BindingParser, ParseError};

/// Parse with grammar auto-detection.
pub fn parse_binding(input: &str) -> Result<Binding, ParseError> {
    BindingParser::parse(input, BindingSyntax::Auto)
}
