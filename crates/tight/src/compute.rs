//! Computed properties.

use std::rc::Rc;

use serde_json::Value;
use tight_path::Path;
use tracing::debug;

use crate::dom::Document;
use crate::error::Error;
use crate::observe::Callback;
use crate::store::Tight;

/// Declared computed properties, as target -> sources edges.
#[derive(Debug, Clone, Default)]
pub struct ComputeGraph {
    edges: Vec<(Path, Vec<Path>)>,
}

impl ComputeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject a declaration that would make writes to `target` feed back
    /// into it.
    ///
    /// A source related to the target recurses immediately. Otherwise the
    /// declaration is cyclic when a write to `target` reaches, through
    /// already declared properties, a path related to one of `sources`.
    pub fn check(&self, target: &Path, sources: &[Path]) -> Result<(), Error> {
        if let Some(source) = sources.iter().find(|s| s.is_related(target)) {
            return Err(cyclic(target, source));
        }

        let mut seen: Vec<&Path> = vec![target];
        let mut stack: Vec<&Path> = vec![target];
        while let Some(written) = stack.pop() {
            for (computed, inputs) in &self.edges {
                if seen.contains(&computed) || !inputs.iter().any(|i| i.is_related(written)) {
                    continue;
                }
                if let Some(source) = sources.iter().find(|s| s.is_related(computed)) {
                    return Err(cyclic(target, source));
                }
                seen.push(computed);
                stack.push(computed);
            }
        }
        Ok(())
    }

    pub fn insert(&mut self, target: Path, sources: Vec<Path>) {
        self.edges.push((target, sources));
    }

    /// Sources of every declaration of `target`.
    pub fn sources_of(&self, target: &Path) -> Vec<&Path> {
        self.edges
            .iter()
            .filter(|(t, _)| t == target)
            .flat_map(|(_, sources)| sources.iter())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

fn cyclic(target: &Path, via: &Path) -> Error {
    Error::CyclicCompute {
        target: target.to_string(),
        via: via.to_string(),
    }
}

impl<D: Document + 'static> Tight<D> {
    /// Declare `target` as computed from `sources`.
    ///
    /// `f` runs once immediately and again after every write that reaches
    /// one of the sources; its result is written to `target` through
    /// [`Tight::set`], so observers and bindings of the target fire as
    /// usual. An empty target or source list does nothing.
    ///
    /// ```
    /// use tight::{JsonMlDocument, Tight};
    /// use serde_json::{json, Value};
    ///
    /// let mut tight = Tight::new(JsonMlDocument::new());
    /// tight.set("a", 1).unwrap();
    /// tight.set("b", 2).unwrap();
    /// tight.compute("sum", |t| {
    ///     let n = |p| t.get(p).and_then(Value::as_i64).unwrap_or(0);
    ///     json!(n("a") + n("b"))
    /// }, &["a", "b"]).unwrap();
    /// assert_eq!(tight.get("sum"), Some(&json!(3)));
    ///
    /// tight.set("b", 5).unwrap();
    /// assert_eq!(tight.get("sum"), Some(&json!(6)));
    /// ```
    pub fn compute<F>(&mut self, target: &str, f: F, sources: &[&str]) -> Result<(), Error>
    where
        F: Fn(&Tight<D>) -> Value + 'static,
    {
        if target.trim().is_empty() {
            return Ok(());
        }
        let target = Path::parse(target)?;
        let sources = sources
            .iter()
            .filter(|s| !s.trim().is_empty())
            .map(|s| Path::parse(s))
            .collect::<Result<Vec<_>, _>>()?;
        if sources.is_empty() {
            return Ok(());
        }

        self.computed.check(&target, &sources)?;
        self.computed.insert(target.clone(), sources.clone());
        debug!(target = %target, sources = sources.len(), "computed property declared");

        let f = Rc::new(f);
        let update: Callback<D> = {
            let target = target.clone();
            let f = f.clone();
            Rc::new(move |tight: &mut Tight<D>| {
                let value = f(tight);
                tight.set_path(&target, value)
            })
        };
        for source in sources {
            self.observers.observe(source, update.clone());
        }

        let value = f(self);
        self.set_path(&target, value)
    }
}
