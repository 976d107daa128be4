//! Core logic of the `tight-render` binary.
//!
//! Renders a JsonML template against a JSON data document: the template's
//! bindings are parsed, then every top-level key of the data is written
//! into the store in document order.

use serde_json::Value;
use thiserror::Error;

use crate::dom::{JsonMlDocument, JsonMlError};
use crate::error::Error;
use crate::store::Tight;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("data must be a JSON object")]
    DataNotObject,
    #[error("invalid template: {0}")]
    Template(#[from] JsonMlError),
    #[error(transparent)]
    Engine(#[from] Error),
}

/// Render `template` (JsonML text) with `data` (JSON object text) and
/// return the resulting HTML.
///
/// ```
/// let html = tight::cli::render_template(
///     r#"["p", {"data-binding": "user.name | upcase"}]"#,
///     r#"{"user": {"name": "ada"}}"#,
/// ).unwrap();
/// assert_eq!(html, r#"<p data-binding="user.name | upcase">ADA</p>"#);
/// ```
pub fn render_template(template: &str, data: &str) -> Result<String, CliError> {
    let template: Value = serde_json::from_str(template)?;
    let data: Value = serde_json::from_str(data)?;
    let Value::Object(data) = data else {
        return Err(CliError::DataNotObject);
    };

    let mut tight = Tight::new(JsonMlDocument::from_json_ml(&template)?);
    tight.parse_bindings()?;
    for (key, value) in data {
        tight.set(&key, value)?;
    }
    Ok(tight.document().to_html())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_attribute_bindings() {
        let html = render_template(
            r#"["a", {"data-binding": "link.url:href"}, "home"]"#,
            r#"{"link": {"url": "/"}}"#,
        )
        .unwrap();
        assert_eq!(html, r#"<a data-binding="link.url:href" href="/">home</a>"#);
    }

    #[test]
    fn rejects_non_object_data() {
        let err = render_template(r#"["p"]"#, "[1, 2]").unwrap_err();
        assert!(matches!(err, CliError::DataNotObject));
    }

    #[test]
    fn reports_template_errors() {
        let err = render_template(r#"[1]"#, "{}").unwrap_err();
        assert_eq!(err.to_string(), "invalid template: JsonML element must start with a tag name");
    }

    #[test]
    fn reports_binding_errors() {
        let err = render_template(r#"["p", {"data-binding": "a | nope"}]"#, "{}").unwrap_err();
        assert_eq!(err.to_string(), "filter 'nope' is not defined");
    }
}
