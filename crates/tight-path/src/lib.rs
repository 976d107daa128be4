//! Dotted property paths over a JSON store.
//!
//! A path such as `model.pages.current` addresses a location inside a tree
//! of `serde_json::Value` containers. This crate parses and relates paths,
//! resolves them (`get`, `get_mut`), writes through them with
//! auto-vivification of intermediate containers (`set`), and indexes
//! subscribers by path segments (`PathIndex`).
//!
//! # Example
//!
//! ```
//! use tight_path::{get, set, Path};
//! use serde_json::json;
//!
//! let mut store = json!({});
//! let path = Path::parse("model.name").unwrap();
//! set(&mut store, &path, json!("Albert Einstein"));
//! assert_eq!(store, json!({"model": {"name": "Albert Einstein"}}));
//! assert_eq!(get(&store, &path), Some(&json!("Albert Einstein")));
//!
//! // A scalar in the way is replaced with an empty object.
//! set(&mut store, &Path::parse("model.name.first").unwrap(), json!("Albert"));
//! assert_eq!(store, json!({"model": {"name": {"first": "Albert"}}}));
//! ```

use serde_json::{Map, Value};

pub mod types;
pub use types::Path;

pub mod validate;
pub use validate::{validate_path, PathError};

pub mod index;
pub use index::PathIndex;

/// Join segments into a dotted path string.
///
/// # Example
///
/// ```
/// use tight_path::format_path;
///
/// assert_eq!(format_path(&["model".to_string(), "name".to_string()]), "model.name");
/// assert_eq!(format_path(&[]), "");
/// ```
pub fn format_path(segments: &[String]) -> String {
    segments.join(".")
}

/// Check if `parent` segments are a strict prefix of `child` segments.
///
/// # Example
///
/// ```
/// use tight_path::is_child;
///
/// let parent = vec!["model".to_string()];
/// let child = vec!["model".to_string(), "name".to_string()];
/// assert!(is_child(&parent, &child));
/// assert!(!is_child(&child, &parent));
/// assert!(!is_child(&parent, &parent));
/// ```
pub fn is_child(parent: &[String], child: &[String]) -> bool {
    parent.len() < child.len() && child[..parent.len()] == *parent
}

/// Check if a segment is a valid non-negative array index.
///
/// Leading zeros are rejected so that `"01"` stays an object key.
pub fn array_index(segment: &str) -> Option<usize> {
    let bytes = segment.as_bytes();
    if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == b'0') {
        return None;
    }
    if !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    segment.parse().ok()
}

/// True for values that `set` can descend into.
pub fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Resolve a path in a store.
///
/// Returns `None` as soon as an intermediate value is missing, null or not
/// a container. A terminal `null` is returned as `Some(&Value::Null)`.
///
/// # Example
///
/// ```
/// use tight_path::{get, Path};
/// use serde_json::json;
///
/// let doc = json!({"model": {"pages": [10, 20]}, "gone": null});
/// assert_eq!(get(&doc, &Path::parse("model.pages.1").unwrap()), Some(&json!(20)));
/// assert_eq!(get(&doc, &Path::parse("gone").unwrap()), Some(&json!(null)));
/// assert_eq!(get(&doc, &Path::parse("gone.name").unwrap()), None);
/// ```
pub fn get<'a>(root: &'a Value, path: &Path) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(root, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(arr) => array_index(segment).and_then(|idx| arr.get(idx)),
            _ => None,
        })
}

/// Resolve a path to a mutable reference without creating anything.
pub fn get_mut<'a>(root: &'a mut Value, path: &Path) -> Option<&'a mut Value> {
    let mut current = root;
    for segment in path.segments() {
        current = match current {
            Value::Object(map) => map.get_mut(segment)?,
            Value::Array(arr) => arr.get_mut(array_index(segment)?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Write `value` at `path`, creating intermediate containers.
///
/// Any intermediate value that cannot hold the next segment (a scalar,
/// `null`, or an array addressed by a non-index key) is overwritten with an
/// empty object. An array replaced this way loses its elements. Arrays
/// addressed by an index grow with `null` padding.
/// Returns the previous value at `path` (`Value::Null` if there was none).
pub fn set(root: &mut Value, path: &Path, value: Value) -> Value {
    let mut current = root;
    for segment in path.segments() {
        current = slot(current, segment);
    }
    std::mem::replace(current, value)
}

/// Return the child slot for `key`, converting `container` into a container
/// that can hold `key` first.
fn slot<'a>(container: &'a mut Value, key: &str) -> &'a mut Value {
    let index = match container {
        Value::Array(_) => array_index(key),
        _ => None,
    };
    match (container, index) {
        (Value::Array(arr), Some(idx)) => {
            if idx >= arr.len() {
                arr.resize(idx + 1, Value::Null);
            }
            &mut arr[idx]
        }
        (container, _) => {
            if !container.is_object() {
                *container = Value::Object(Map::new());
            }
            let Value::Object(map) = container else {
                unreachable!("container was replaced with an object")
            };
            map.entry(key.to_string()).or_insert(Value::Null)
        }
    }
}
