use crate::error::FilterError;
use crate::filters;
use crate::types::{Arity, FilterCtx, FilterDefinition, FilterMap};
use serde_json::Value;
use std::sync::Arc;

/// Named filter registry. Last registration for a name wins.
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    filters: FilterMap,
}

impl FilterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry preloaded with the built-in filters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for def in filters::all_filters() {
            registry.insert(def);
        }
        registry
    }

    /// Register a filter that accepts any number of arguments.
    ///
    /// An empty name is ignored.
    pub fn define<F>(&mut self, name: &str, apply: F)
    where
        F: Fn(&mut FilterCtx<'_>, Value, &[String]) -> Result<Value, FilterError>
            + Send
            + Sync
            + 'static,
    {
        self.define_with_arity(name, Arity::Any, apply);
    }

    /// Register a filter with a declared arity.
    pub fn define_with_arity<F>(&mut self, name: &str, arity: Arity, apply: F)
    where
        F: Fn(&mut FilterCtx<'_>, Value, &[String]) -> Result<Value, FilterError>
            + Send
            + Sync
            + 'static,
    {
        if name.is_empty() {
            return;
        }
        self.insert(FilterDefinition::new(name, arity, apply));
    }

    /// Register a prepared definition, replacing any filter of the same name.
    pub fn insert(&mut self, def: FilterDefinition) {
        self.filters.insert(def.name.clone(), Arc::new(def));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<FilterDefinition>> {
        self.filters.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    /// The live name -> definition map.
    pub fn filters(&self) -> &FilterMap {
        &self.filters
    }
}
