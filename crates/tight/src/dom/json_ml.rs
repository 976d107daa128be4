//! In-memory document built from JsonML.
//!
//! JsonML writes markup as nested JSON arrays: `[tag, attrs, ...children]`
//! where `attrs` is an optional object and string children are text. An
//! empty tag is a fragment whose children are inlined into the parent.

use serde_json::Value;
use thiserror::Error;
use tight_filter::util::render;

use super::{Document, ElementId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsonMlError {
    #[error("JsonML element must start with a tag name")]
    InvalidTag,
    #[error("JsonML attributes must follow the tag")]
    MisplacedAttributes,
    #[error("JsonML text must be inside an element")]
    TextOutsideElement,
}

/// Elements that never have content.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone, PartialEq)]
enum Child {
    /// Text from the source tree; escaped on output.
    Text(String),
    /// Markup written through `set_inner_html`; emitted verbatim.
    Html(String),
    Element(ElementId),
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Child>,
    parent: Option<ElementId>,
    attached: bool,
}

/// Arena-backed document. Element ids stay valid after removal; removed
/// elements are skipped by queries but can still be written to.
#[derive(Debug, Clone, Default)]
pub struct JsonMlDocument {
    nodes: Vec<Node>,
    roots: Vec<ElementId>,
}

impl JsonMlDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from a JsonML tree.
    ///
    /// ```
    /// use tight::dom::{Document, JsonMlDocument};
    /// use serde_json::json;
    ///
    /// let doc = JsonMlDocument::from_json_ml(&json!(
    ///     ["div", {"id": "app"}, ["span", {"data-binding": "model.name"}], "!"]
    /// )).unwrap();
    /// assert_eq!(doc.query_attribute("data-binding").len(), 1);
    /// assert_eq!(doc.to_html(), r#"<div id="app"><span data-binding="model.name"></span>!</div>"#);
    /// ```
    pub fn from_json_ml(tree: &Value) -> Result<Self, JsonMlError> {
        let mut doc = Self::new();
        doc.build(tree, None)?;
        Ok(doc)
    }

    fn build(&mut self, value: &Value, parent: Option<ElementId>) -> Result<(), JsonMlError> {
        match value {
            Value::Array(items) => {
                let tag = match items.first() {
                    Some(Value::String(tag)) => tag.clone(),
                    _ => return Err(JsonMlError::InvalidTag),
                };
                let (attrs, children): (Vec<(String, String)>, &[Value]) = match items.get(1) {
                    Some(Value::Object(map)) => (
                        map.iter().map(|(k, v)| (k.clone(), render(v))).collect(),
                        &items[2..],
                    ),
                    Some(Value::Null) => (Vec::new(), &items[2..]),
                    _ => (Vec::new(), items.get(1..).unwrap_or_default()),
                };
                if tag.is_empty() {
                    for child in children {
                        self.build(child, parent)?;
                    }
                    return Ok(());
                }
                let id = self.push(parent, tag, attrs);
                for child in children {
                    self.build(child, Some(id))?;
                }
                Ok(())
            }
            Value::Null => Ok(()),
            Value::Object(_) => Err(JsonMlError::MisplacedAttributes),
            scalar => match parent {
                Some(parent) => {
                    self.append_text(parent, &render(scalar));
                    Ok(())
                }
                None => Err(JsonMlError::TextOutsideElement),
            },
        }
    }

    fn push(
        &mut self,
        parent: Option<ElementId>,
        tag: String,
        attrs: Vec<(String, String)>,
    ) -> ElementId {
        let id = ElementId(self.nodes.len());
        let attached = parent.map_or(true, |p| self.is_attached(p));
        self.nodes.push(Node {
            tag,
            attrs,
            children: Vec::new(),
            parent,
            attached,
        });
        match parent.and_then(|p| self.nodes.get_mut(p.0)) {
            Some(node) => node.children.push(Child::Element(id)),
            None => self.roots.push(id),
        }
        id
    }

    /// Append a new element under `parent`, or as a new root.
    pub fn append_element(
        &mut self,
        parent: Option<ElementId>,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> ElementId {
        let attrs = attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.push(parent, tag.to_string(), attrs)
    }

    pub fn append_text(&mut self, parent: ElementId, text: &str) {
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(Child::Text(text.to_string()));
        }
    }

    /// Detach `element` and its subtree from the document.
    pub fn remove(&mut self, element: ElementId) {
        let Some(parent) = self.nodes.get(element.0).map(|n| n.parent) else {
            return;
        };
        match parent {
            Some(parent) => {
                if let Some(parent) = self.nodes.get_mut(parent.0) {
                    parent.children.retain(|c| *c != Child::Element(element));
                }
            }
            None => self.roots.retain(|r| *r != element),
        }
        if let Some(node) = self.nodes.get_mut(element.0) {
            node.parent = None;
        }
        self.detach(element);
    }

    fn detach(&mut self, element: ElementId) {
        let mut stack = vec![element];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(id.0) {
                node.attached = false;
                stack.extend(node.children.iter().filter_map(|c| match c {
                    Child::Element(child) => Some(*child),
                    _ => None,
                }));
            }
        }
    }

    pub fn is_attached(&self, element: ElementId) -> bool {
        self.nodes.get(element.0).is_some_and(|n| n.attached)
    }

    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(element.0).map(|n| n.tag.as_str())
    }

    /// First attached element whose `id` attribute equals `id`.
    pub fn find_by_id(&self, id: &str) -> Option<ElementId> {
        self.walk()
            .into_iter()
            .find(|el| self.attribute(*el, "id").as_deref() == Some(id))
    }

    /// Attached elements in document order (pre-order).
    fn walk(&self) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id.0) else {
                continue;
            };
            out.push(id);
            // Push children in reverse so the first child is popped first
            for child in node.children.iter().rev() {
                if let Child::Element(child) = child {
                    stack.push(*child);
                }
            }
        }
        out
    }

    /// Serialize every root element.
    pub fn to_html(&self) -> String {
        self.roots.iter().map(|r| self.outer_html(*r)).collect()
    }

    /// Serialize one element including its own tag.
    pub fn outer_html(&self, element: ElementId) -> String {
        let Some(node) = self.nodes.get(element.0) else {
            return String::new();
        };
        let mut out = format!("<{}", node.tag);
        for (k, v) in &node.attrs {
            out.push(' ');
            out.push_str(k);
            out.push_str("=\"");
            out.push_str(&escape_attr(v));
            out.push('"');
        }
        if node.children.is_empty() && VOID_TAGS.contains(&node.tag.as_str()) {
            out.push_str(" />");
            return out;
        }
        out.push('>');
        out.push_str(&self.inner_html(element));
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
        out
    }
}

impl Document for JsonMlDocument {
    fn query_attribute(&self, attribute: &str) -> Vec<ElementId> {
        self.walk()
            .into_iter()
            .filter(|el| {
                self.nodes
                    .get(el.0)
                    .is_some_and(|n| n.attrs.iter().any(|(k, _)| k == attribute))
            })
            .collect()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        let node = self.nodes.get(element.0)?;
        node.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        let Some(node) = self.nodes.get_mut(element.0) else {
            return;
        };
        match node.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => node.attrs.push((name.to_string(), value.to_string())),
        }
    }

    fn inner_html(&self, element: ElementId) -> String {
        let Some(node) = self.nodes.get(element.0) else {
            return String::new();
        };
        node.children
            .iter()
            .map(|child| match child {
                Child::Text(s) => escape_text(s),
                Child::Html(s) => s.clone(),
                Child::Element(id) => self.outer_html(*id),
            })
            .collect()
    }

    fn set_inner_html(&mut self, element: ElementId, html: &str) {
        // Writing the current markup back keeps nested elements in place.
        if self.inner_html(element) == html {
            return;
        }
        let Some(node) = self.nodes.get_mut(element.0) else {
            return;
        };
        let replaced = std::mem::take(&mut node.children);
        if !html.is_empty() {
            node.children.push(Child::Html(html.to_string()));
        }
        for child in replaced {
            if let Child::Element(id) = child {
                if let Some(node) = self.nodes.get_mut(id.0) {
                    node.parent = None;
                }
                self.detach(id);
            }
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}
