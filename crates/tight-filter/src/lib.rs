//! Named value filters for Tight bindings.
//!
//! A binding such as `model.name | upcase | replace: "A", "B"` pipes the
//! bound value through a chain of registered filters. Each filter receives
//! the running value plus its quoted arguments as strings, and may act on
//! the bound element through [`FilterCtx`].
//!
//! # Example
//!
//! ```
//! use tight_filter::{apply, FilterCall, FilterCtx, FilterRegistry};
//! use serde_json::{json, Value};
//!
//! let mut registry = FilterRegistry::with_defaults();
//! registry.define("exclaim", |_ctx, value, _args| {
//!     Ok(Value::String(format!("{}!", value.as_str().unwrap_or_default())))
//! });
//!
//! let chain = vec![FilterCall::new("exclaim"), FilterCall::new("upcase")];
//! let out = apply(&registry, &chain, Some(json!("hi")), &mut FilterCtx::detached()).unwrap();
//! assert_eq!(out, json!("HI!"));
//! ```

pub mod error;
pub mod filters;
pub mod pipeline;
pub mod registry;
pub mod types;
pub mod util;

pub use error::FilterError;
pub use pipeline::apply;
pub use registry::FilterRegistry;
pub use types::{assert_arity, Arity, Element, FilterCall, FilterCtx, FilterDefinition, FilterFn, FilterMap};
