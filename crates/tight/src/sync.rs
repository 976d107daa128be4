//! Binding index and document synchronization.

use serde_json::Value;
use tight_binding::{Binding, BindingParser};
use tight_filter::util::{is_truthy, render, render_opt};
use tight_filter::{FilterCtx, FilterRegistry};
use tight_path::{Path, PathIndex};
use tracing::{debug, trace};

use crate::dom::{Document, ElementId, ElementRef};
use crate::error::Error;
use crate::store::Tight;

#[derive(Debug, Clone)]
struct BoundElement {
    element: ElementId,
    binding: Binding,
}

/// Bound elements, indexed by the path each one renders.
///
/// Entries are never removed when their element leaves the document; a
/// stale entry keeps rendering into the detached element until the next
/// full rebuild.
#[derive(Debug, Clone, Default)]
pub struct BindingIndex {
    bound: Vec<BoundElement>,
    index: PathIndex<usize>,
    built: bool,
}

impl BindingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bound.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Whether the document has been scanned at least once.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Bound elements in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Binding)> {
        self.bound.iter().map(|b| (b.element, &b.binding))
    }

    fn clear(&mut self) {
        self.bound.clear();
        self.index.clear();
        self.built = false;
    }

    fn push(&mut self, element: ElementId, binding: Binding) {
        self.index.insert(binding.property(), self.bound.len());
        self.bound.push(BoundElement { element, binding });
    }

    /// Positions of the bindings affected by a write to `path`, in
    /// discovery order.
    fn affected(&self, path: &Path) -> Vec<usize> {
        let mut hits: Vec<usize> = self.index.related(path).into_iter().copied().collect();
        hits.sort_unstable();
        hits
    }
}

impl<D: Document + 'static> Tight<D> {
    /// Scan the document for bound elements, render each one and rebuild
    /// the index. Returns the number of bound elements.
    pub fn parse_bindings(&mut self) -> Result<usize, Error> {
        self.bindings.clear();
        let attribute = self.options.binding_attribute.clone();
        for element in self.document.query_attribute(&attribute) {
            let Some(expression) = self.document.attribute(element, &attribute) else {
                continue;
            };
            let binding = BindingParser::parse(&expression, self.options.syntax)?;
            render_binding(&mut self.document, &self.filters, &self.data, element, &binding)?;
            self.bindings.push(element, binding);
        }
        self.bindings.built = true;
        debug!(count = self.bindings.len(), attribute = %attribute, "bindings parsed");
        Ok(self.bindings.len())
    }

    /// Re-render every binding related to `path`. Builds the index on first
    /// use.
    pub(crate) fn update(&mut self, path: &Path) -> Result<(), Error> {
        if !self.bindings.built {
            // A full scan renders every binding against the current store.
            self.parse_bindings()?;
            return Ok(());
        }
        for i in self.bindings.affected(path) {
            let Some(bound) = self.bindings.bound.get(i) else {
                continue;
            };
            trace!(element = bound.element.0, property = %bound.binding.property(), "render binding");
            render_binding(
                &mut self.document,
                &self.filters,
                &self.data,
                bound.element,
                &bound.binding,
            )?;
        }
        Ok(())
    }

    pub fn bindings(&self) -> &BindingIndex {
        &self.bindings
    }
}

fn render_binding<D: Document>(
    document: &mut D,
    filters: &FilterRegistry,
    data: &Value,
    element: ElementId,
    binding: &Binding,
) -> Result<(), Error> {
    let value = tight_path::get(data, binding.property());
    match binding {
        Binding::Filters(b) => {
            let out = {
                let mut target = ElementRef::new(document, element);
                tight_filter::apply(filters, &b.filters, value.cloned(), &mut FilterCtx::new(&mut target))?
            };
            document.set_inner_html(element, &render(&out));
        }
        Binding::Attribute(b) => match &b.target {
            None => document.set_inner_html(element, &render_opt(value)),
            Some(name) if b.is_toggle() => {
                let literal = if is_truthy(value) { &b.truthy } else { &b.falsy };
                document.set_attribute(element, name, literal);
            }
            Some(name) => document.set_attribute(element, name, &render_opt(value)),
        },
    }
    Ok(())
}
