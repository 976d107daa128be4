//! Observer registry.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use tight_path::{Path, PathIndex};

use crate::error::Error;
use crate::store::Tight;

/// Observer callback. Receives the engine so it can read and write the store.
pub type Callback<D> = Rc<dyn Fn(&mut Tight<D>) -> Result<(), Error>>;

/// Callbacks keyed by exact observed path.
///
/// Keys keep the order they were first observed in; each key's callbacks
/// keep registration order. Duplicates are allowed.
pub struct ObserverRegistry<D> {
    observers: IndexMap<Path, Vec<Callback<D>>>,
    /// Observed path -> position in `observers`.
    index: PathIndex<usize>,
}

impl<D> Default for ObserverRegistry<D> {
    fn default() -> Self {
        ObserverRegistry {
            observers: IndexMap::new(),
            index: PathIndex::new(),
        }
    }
}

impl<D> ObserverRegistry<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, path: Path, callback: Callback<D>) {
        match self.observers.get_index_of(&path) {
            Some(i) => self.observers[i].push(callback),
            None => {
                self.index.insert(&path, self.observers.len());
                self.observers.insert(path, vec![callback]);
            }
        }
    }

    /// Callbacks to run after a write to `path`: those observing `path`, an
    /// ancestor of it, or a descendant of it.
    pub fn triggered_by(&self, path: &Path) -> Vec<Callback<D>> {
        let mut keys: Vec<usize> = self.index.related(path).into_iter().copied().collect();
        keys.sort_unstable();
        keys.into_iter()
            .filter_map(|i| self.observers.get_index(i))
            .flat_map(|(_, callbacks)| callbacks.iter().cloned())
            .collect()
    }

    /// Number of callbacks registered on exactly `path`.
    pub fn count(&self, path: &Path) -> usize {
        self.observers.get(path).map_or(0, Vec::len)
    }

    pub fn observers(&self) -> &IndexMap<Path, Vec<Callback<D>>> {
        &self.observers
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<D> fmt::Debug for ObserverRegistry<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.observers.iter().map(|(k, v)| (k.to_string(), v.len())))
            .finish()
    }
}
