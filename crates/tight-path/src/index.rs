//! Segment trie mapping paths to subscriber lists.
//!
//! Each node owns the entries registered at exactly its path. Lookups walk
//! segments instead of matching strings, so a write to `model` reaches
//! entries under `model.name` without scanning unrelated keys.

use crate::types::Path;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Node<T> {
    entries: Vec<T>,
    children: BTreeMap<String, Node<T>>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Node {
            entries: Vec::new(),
            children: BTreeMap::new(),
        }
    }
}

impl<T> Node<T> {
    fn collect_subtree<'a>(&'a self, out: &mut Vec<&'a T>) {
        out.extend(self.entries.iter());
        for child in self.children.values() {
            child.collect_subtree(out);
        }
    }
}

/// Index of entries keyed by path, supporting exact, ancestor and
/// descendant lookups.
///
/// # Example
///
/// ```
/// use tight_path::{Path, PathIndex};
///
/// let mut index = PathIndex::new();
/// index.insert(&Path::parse("model.name").unwrap(), 1);
/// index.insert(&Path::parse("model.pages.current").unwrap(), 2);
/// index.insert(&Path::parse("version").unwrap(), 3);
///
/// let hits: Vec<_> = index.related(&Path::parse("model").unwrap()).into_iter().copied().collect();
/// assert_eq!(hits, vec![1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct PathIndex<T> {
    root: Node<T>,
    len: usize,
}

impl<T> Default for PathIndex<T> {
    fn default() -> Self {
        PathIndex {
            root: Node::default(),
            len: 0,
        }
    }
}

impl<T> PathIndex<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries across all paths.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.root = Node::default();
        self.len = 0;
    }

    /// Append `entry` to the list at `path`.
    pub fn insert(&mut self, path: &Path, entry: T) {
        let mut node = &mut self.root;
        for segment in path.segments() {
            node = node.children.entry(segment.clone()).or_default();
        }
        node.entries.push(entry);
        self.len += 1;
    }

    fn node(&self, path: &Path) -> Option<&Node<T>> {
        path.segments()
            .iter()
            .try_fold(&self.root, |node, segment| node.children.get(segment))
    }

    /// Entries registered at exactly `path`, in insertion order.
    pub fn exact(&self, path: &Path) -> &[T] {
        self.node(path).map(|n| n.entries.as_slice()).unwrap_or(&[])
    }

    /// Entries at strict ancestors of `path`, outermost first.
    pub fn ancestors(&self, path: &Path) -> Vec<&T> {
        let mut out = Vec::new();
        let mut node = &self.root;
        let segments = path.segments();
        for segment in &segments[..segments.len().saturating_sub(1)] {
            match node.children.get(segment) {
                Some(next) => {
                    out.extend(next.entries.iter());
                    node = next;
                }
                None => break,
            }
        }
        out
    }

    /// Entries at strict descendants of `path`, in segment order.
    pub fn descendants(&self, path: &Path) -> Vec<&T> {
        let mut out = Vec::new();
        if let Some(node) = self.node(path) {
            for child in node.children.values() {
                child.collect_subtree(&mut out);
            }
        }
        out
    }

    /// Entries whose path is equal to, an ancestor of, or a descendant of
    /// `path`.
    pub fn related(&self, path: &Path) -> Vec<&T> {
        let mut out = self.ancestors(path);
        if let Some(node) = self.node(path) {
            node.collect_subtree(&mut out);
        }
        out
    }
}
