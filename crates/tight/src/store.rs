//! The engine: path store, write dispatch and filter registration.

use std::fmt;
use std::rc::Rc;

use serde_json::{json, Value};
use tight_filter::{Arity, FilterCtx, FilterError, FilterRegistry};
use tight_path::Path;
use tracing::{debug, trace};

use crate::compute::ComputeGraph;
use crate::dom::{Document, JsonMlDocument};
use crate::error::Error;
use crate::observe::ObserverRegistry;
use crate::options::Options;
use crate::sync::BindingIndex;

/// Reactive store bound to a document.
///
/// Every write runs inline: bindings related to the written path are
/// re-rendered, then related observers run in order. Observers may write
/// back into the store; nesting is bounded by
/// [`Options::max_dispatch_depth`].
pub struct Tight<D = JsonMlDocument> {
    pub(crate) data: Value,
    pub(crate) observers: ObserverRegistry<D>,
    pub(crate) filters: FilterRegistry,
    pub(crate) bindings: BindingIndex,
    pub(crate) computed: ComputeGraph,
    pub(crate) document: D,
    pub(crate) options: Options,
    depth: usize,
}

impl<D: Document + 'static> Tight<D> {
    pub fn new(document: D) -> Self {
        Self::with_options(document, Options::default())
    }

    pub fn with_options(document: D, options: Options) -> Self {
        let filters = if options.default_filters {
            FilterRegistry::with_defaults()
        } else {
            FilterRegistry::new()
        };
        Tight {
            data: json!({}),
            observers: ObserverRegistry::new(),
            filters,
            bindings: BindingIndex::new(),
            computed: ComputeGraph::new(),
            document,
            options,
            depth: 0,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The whole store.
    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access to the host document. Changes made here are not
    /// seen by the engine until the next [`Tight::parse_bindings`].
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    /// Read the value at `path`. Missing, malformed and empty paths all
    /// read as `None`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let path = Path::parse(path).ok()?;
        tight_path::get(&self.data, &path)
    }

    /// Write `value` at `path`, then refresh related bindings and run
    /// related observers.
    ///
    /// An empty path does nothing. Intermediate values that are not
    /// containers are replaced with objects.
    ///
    /// ```
    /// use tight::{JsonMlDocument, Tight};
    /// use serde_json::json;
    ///
    /// let mut tight = Tight::new(JsonMlDocument::new());
    /// tight.set("model.name", "Tight").unwrap();
    /// tight.set("version", 1).unwrap();
    /// assert_eq!(tight.data(), &json!({"model": {"name": "Tight"}, "version": 1}));
    /// ```
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<(), Error> {
        if path.trim().is_empty() {
            return Ok(());
        }
        let path = Path::parse(path)?;
        self.set_path(&path, value.into())
    }

    pub(crate) fn set_path(&mut self, path: &Path, value: Value) -> Result<(), Error> {
        if self.depth >= self.options.max_dispatch_depth {
            return Err(Error::DispatchDepth {
                limit: self.options.max_dispatch_depth,
                path: path.to_string(),
            });
        }
        self.depth += 1;
        let result = self.write(path, value);
        self.depth -= 1;
        result
    }

    fn write(&mut self, path: &Path, value: Value) -> Result<(), Error> {
        debug!(path = %path, depth = self.depth, "set");
        tight_path::set(&mut self.data, path, value);
        self.update(path)?;
        for callback in self.observers.triggered_by(path) {
            trace!(path = %path, "observer");
            callback(self)?;
        }
        Ok(())
    }

    /// Run `callback` after every write to `path`, an ancestor of it or a
    /// descendant of it. An empty path does nothing.
    pub fn observe<F>(&mut self, path: &str, callback: F) -> Result<(), Error>
    where
        F: Fn(&mut Tight<D>) -> Result<(), Error> + 'static,
    {
        if path.trim().is_empty() {
            return Ok(());
        }
        let path = Path::parse(path)?;
        self.observers.observe(path, Rc::new(callback));
        Ok(())
    }

    pub fn observers(&self) -> &ObserverRegistry<D> {
        &self.observers
    }

    /// Register a filter accepting any number of arguments. Replaces an
    /// existing filter of the same name; an empty name does nothing.
    pub fn define_filter<F>(&mut self, name: &str, filter: F)
    where
        F: Fn(&mut FilterCtx<'_>, Value, &[String]) -> Result<Value, FilterError>
            + Send
            + Sync
            + 'static,
    {
        self.filters.define(name, filter);
    }

    pub fn define_filter_with_arity<F>(&mut self, name: &str, arity: Arity, filter: F)
    where
        F: Fn(&mut FilterCtx<'_>, Value, &[String]) -> Result<Value, FilterError>
            + Send
            + Sync
            + 'static,
    {
        self.filters.define_with_arity(name, arity, filter);
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }
}

impl<D: fmt::Debug> fmt::Debug for Tight<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tight")
            .field("data", &self.data)
            .field("observers", &self.observers)
            .field("bindings", &self.bindings.len())
            .field("computed", &self.computed.len())
            .field("document", &self.document)
            .field("options", &self.options)
            .finish()
    }
}
