//! Minimal reactive data binding.
//!
//! A [`Tight`] value owns a hierarchical JSON store addressed by dotted
//! paths, the observers and computed properties declared over it, and a
//! [`Document`] whose bound elements are kept in sync with the store.
//!
//! A write to a path re-renders every binding on that path, its ancestors
//! and its descendants, then runs the observers registered on the same set
//! of paths. Everything happens inline before [`Tight::set`] returns.
//!
//! # Example
//!
//! ```
//! use tight::{JsonMlDocument, Tight};
//! use serde_json::json;
//!
//! let doc = JsonMlDocument::from_json_ml(&json!(
//!     ["div", null,
//!         ["h1", {"data-binding": "model.name | upcase"}],
//!         ["img", {"data-binding": "model.url:src"}]]
//! )).unwrap();
//!
//! let mut tight = Tight::new(doc);
//! tight.set("model", json!({"name": "Albert Einstein", "url": "a.png"})).unwrap();
//!
//! assert_eq!(
//!     tight.document().to_html(),
//!     r#"<div><h1 data-binding="model.name | upcase">ALBERT EINSTEIN</h1><img data-binding="model.url:src" src="a.png" /></div>"#
//! );
//! ```

pub mod cli;
pub mod compute;
pub mod dom;
mod error;
pub mod observe;
mod options;
mod store;
pub mod sync;

pub use compute::ComputeGraph;
pub use dom::{Document, ElementId, JsonMlDocument, JsonMlError};
pub use error::Error;
pub use observe::{Callback, ObserverRegistry};
pub use options::Options;
pub use store::Tight;
pub use sync::BindingIndex;

pub use tight_binding::{Binding, BindingSyntax};
pub use tight_filter::{Arity, FilterCtx, FilterError, FilterRegistry};
pub use tight_path::Path;
