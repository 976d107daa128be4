//! Host document boundary.
//!
//! The engine never creates or removes elements. It needs to find every
//! element carrying the binding attribute, read that attribute, and write
//! either inner HTML or a named attribute back. [`Document`] is that
//! contract; [`JsonMlDocument`] is an in-memory implementation.

mod json_ml;
pub use json_ml::{JsonMlDocument, JsonMlError};

/// Handle of an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// Query and mutation primitives supplied by the host.
pub trait Document {
    /// Every attached element carrying `attribute`, in document order.
    fn query_attribute(&self, attribute: &str) -> Vec<ElementId>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    fn inner_html(&self, element: ElementId) -> String;

    fn set_inner_html(&mut self, element: ElementId, html: &str);
}

/// One element of a document, seen through the filter [`Element`] API.
///
/// [`Element`]: tight_filter::Element
pub(crate) struct ElementRef<'a, D: Document + ?Sized> {
    document: &'a mut D,
    element: ElementId,
}

impl<'a, D: Document + ?Sized> ElementRef<'a, D> {
    pub(crate) fn new(document: &'a mut D, element: ElementId) -> Self {
        ElementRef { document, element }
    }
}

impl<D: Document + ?Sized> tight_filter::Element for ElementRef<'_, D> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.document.attribute(self.element, name)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.document.set_attribute(self.element, name, value);
    }

    fn inner_html(&self) -> String {
        self.document.inner_html(self.element)
    }
}
