use serde_json::{json, Value};
use tight::{
    BindingSyntax, Document, ElementId, Error, FilterError, JsonMlDocument, Options, Tight,
};

type Engine = Tight<JsonMlDocument>;

/// A container with one `<span>` per binding expression.
fn engine_with(bindings: &[&str]) -> (Engine, Vec<ElementId>) {
    engine_with_options(bindings, "data-binding", Options::default())
}

fn engine_with_options(
    bindings: &[&str],
    attribute: &str,
    options: Options,
) -> (Engine, Vec<ElementId>) {
    let mut doc = JsonMlDocument::new();
    let container = doc.append_element(None, "div", &[("id", "tight-test")]);
    let spans = bindings
        .iter()
        .map(|b| doc.append_element(Some(container), "span", &[(attribute, b)]))
        .collect();
    (Tight::with_options(doc, options), spans)
}

fn html(tight: &Engine, element: ElementId) -> String {
    tight.document().inner_html(element)
}

fn attr(tight: &Engine, element: ElementId, name: &str) -> Option<String> {
    tight.document().attribute(element, name)
}

#[test]
fn test_updates_html_in_bindings() {
    let (mut tight, spans) = engine_with(&[
        "model.name",
        "model.name",
        "model.pages.current",
        "version",
    ]);

    tight.set("model", json!({"name": "Albert Einstein"})).unwrap();
    tight.set("model.pages.current", 2).unwrap();
    tight.set("version", 1).unwrap();

    assert_eq!(html(&tight, spans[0]), "Albert Einstein");
    assert_eq!(html(&tight, spans[1]), "Albert Einstein");
    assert_eq!(html(&tight, spans[2]), "2");
    assert_eq!(html(&tight, spans[3]), "1");
}

#[test]
fn test_updates_attributes_in_bindings() {
    let (mut tight, spans) = engine_with(&[
        "model.url:src",
        "model.active:class:on:off",
        "model.active:class:on",
        "model.active:class::off",
    ]);

    tight.set("model.url", "http://example.com/image.jpg").unwrap();
    tight.set("model.active", false).unwrap();

    assert_eq!(
        attr(&tight, spans[0], "src").as_deref(),
        Some("http://example.com/image.jpg")
    );
    assert_eq!(attr(&tight, spans[1], "class").as_deref(), Some("off"));
    assert_eq!(attr(&tight, spans[2], "class").as_deref(), Some(""));
    assert_eq!(attr(&tight, spans[3], "class").as_deref(), Some("off"));

    tight.set("model.active", true).unwrap();

    assert_eq!(attr(&tight, spans[1], "class").as_deref(), Some("on"));
    assert_eq!(attr(&tight, spans[2], "class").as_deref(), Some("on"));
    assert_eq!(attr(&tight, spans[3], "class").as_deref(), Some(""));
}

#[test]
fn test_attribute_binding_without_target_renders_content() {
    let (mut tight, spans) = engine_with(&["count:"]);
    tight.set("count", 2.0).unwrap();
    assert_eq!(html(&tight, spans[0]), "2");
    assert_eq!(attr(&tight, spans[0], ""), None);
}

#[test]
fn test_removed_data_renders_empty() {
    let (mut tight, spans) = engine_with(&["m.name"]);
    tight.set("m", json!({"name": "Einstein"})).unwrap();
    assert_eq!(html(&tight, spans[0]), "Einstein");

    tight.set("m", Value::Null).unwrap();
    assert_eq!(html(&tight, spans[0]), "");
}

#[test]
fn test_filter_chain_binding() {
    let (mut tight, spans) = engine_with(&[
        r#"model.name | upcase | replace: "A", "B""#,
        "model.name | split: ' ' | last",
        "model.tags | join: ', '",
    ]);
    tight
        .set("model", json!({"name": "cat and dog", "tags": ["a", "b"]}))
        .unwrap();
    assert_eq!(html(&tight, spans[0]), "CBT BND DOG");
    assert_eq!(html(&tight, spans[1]), "dog");
    assert_eq!(html(&tight, spans[2]), "a, b");
}

#[test]
fn test_attr_filter_in_chain() {
    let (mut tight, spans) = engine_with(&["model.active | attr: 'class', 'on', 'off'"]);
    tight.document_mut().append_text(spans[0], "label");
    tight.set("model.active", 1).unwrap();
    assert_eq!(attr(&tight, spans[0], "class").as_deref(), Some("on"));
    assert_eq!(html(&tight, spans[0]), "label");

    tight.set("model.active", 0).unwrap();
    assert_eq!(attr(&tight, spans[0], "class").as_deref(), Some("off"));
    assert_eq!(html(&tight, spans[0]), "label");
}

#[test]
fn test_user_filter_binding() {
    let (mut tight, spans) = engine_with(&["greeting | exclaim"]);
    tight.define_filter("exclaim", |_, value, _| {
        Ok(Value::String(format!("{}!", value.as_str().unwrap_or_default())))
    });
    tight.set("greeting", "hello").unwrap();
    assert_eq!(html(&tight, spans[0]), "hello!");
    assert!(tight.filters().contains("exclaim"));
}

#[test]
fn test_unknown_filter_fails_the_write() {
    let (mut tight, _) = engine_with(&["name | shout"]);
    let err = tight.set("name", "x").unwrap_err();
    assert!(matches!(err, Error::Filter(FilterError::UnknownFilter(ref n)) if n == "shout"));
    assert_eq!(tight.get("name"), Some(&json!("x")));
}

#[test]
fn test_filter_execution_error() {
    let (mut tight, _) = engine_with(&["count | upcase"]);
    let err = tight.set("count", 3).unwrap_err();
    assert_eq!(err.to_string(), "filter 'upcase' returned error: NOT_STRING");
}

#[test]
fn test_syntax_error_cites_expression() {
    let (mut tight, _) = engine_with(&["-bad | upcase"]);
    let err = tight.parse_bindings().unwrap_err();
    assert!(matches!(err, Error::Syntax(_)));
    assert_eq!(err.to_string(), "syntax error: '-bad | upcase'");
}

#[test]
fn test_parse_bindings_counts_and_renders() {
    let (mut tight, spans) = engine_with(&["a", "b:title"]);
    tight.set("a", "first").unwrap();
    tight.set("b", "second").unwrap();

    tight.document_mut().set_inner_html(spans[0], "stale");
    assert_eq!(tight.parse_bindings().unwrap(), 2);
    assert_eq!(html(&tight, spans[0]), "first");
    assert_eq!(attr(&tight, spans[1], "title").as_deref(), Some("second"));
}

#[test]
fn test_bindings_built_lazily() {
    let (mut tight, _) = engine_with(&["a", "b"]);
    assert!(!tight.bindings().is_built());
    tight.set("a", 1).unwrap();
    assert!(tight.bindings().is_built());
    assert_eq!(tight.bindings().len(), 2);
}

#[test]
fn test_siblings_are_not_rerendered() {
    let (mut tight, spans) = engine_with(&["model.name", "model.age"]);
    tight.parse_bindings().unwrap();
    tight.document_mut().set_inner_html(spans[1], "untouched");

    tight.set("model.name", "Ada").unwrap();
    assert_eq!(html(&tight, spans[0]), "Ada");
    assert_eq!(html(&tight, spans[1]), "untouched");

    tight.set("model", json!({"name": "Grace", "age": 85})).unwrap();
    assert_eq!(html(&tight, spans[1]), "85");
}

#[test]
fn test_child_write_rerenders_ancestor_binding() {
    let (mut tight, spans) = engine_with(&["model", "model.name", "other"]);
    tight.parse_bindings().unwrap();
    tight.document_mut().set_inner_html(spans[2], "untouched");

    tight.set("model.name", "a").unwrap();
    assert_eq!(html(&tight, spans[0]), r#"{"name":"a"}"#);

    tight.set("model.name", "b").unwrap();
    assert_eq!(html(&tight, spans[0]), r#"{"name":"b"}"#);
    assert_eq!(html(&tight, spans[1]), "b");
    assert_eq!(html(&tight, spans[2]), "untouched");
}

#[test]
fn test_replace_keeps_unknown_group_reference() {
    let (mut tight, spans) = engine_with(&[r#"v | replace: "cost", "$5""#]);
    tight.set("v", "cost").unwrap();
    assert_eq!(html(&tight, spans[0]), "$5");
}

#[test]
fn test_elements_added_later_need_rebuild() {
    let (mut tight, _) = engine_with(&["title"]);
    tight.set("title", "one").unwrap();

    let late = tight
        .document_mut()
        .append_element(None, "p", &[("data-binding", "title")]);
    tight.set("title", "two").unwrap();
    assert_eq!(html(&tight, late), "");

    assert_eq!(tight.parse_bindings().unwrap(), 2);
    assert_eq!(html(&tight, late), "two");
}

#[test]
fn test_removed_element_keeps_rendering() {
    let (mut tight, spans) = engine_with(&["title"]);
    tight.parse_bindings().unwrap();
    tight.document_mut().remove(spans[0]);

    tight.set("title", "gone").unwrap();
    assert!(!tight.document().is_attached(spans[0]));
    assert_eq!(html(&tight, spans[0]), "gone");
    assert_eq!(tight.bindings().len(), 1);

    assert_eq!(tight.parse_bindings().unwrap(), 0);
}

#[test]
fn test_custom_binding_attribute() {
    let options = Options::default().with_binding_attribute("data-bind");
    let (mut tight, spans) = engine_with_options(&["name"], "data-bind", options);
    tight.set("name", "custom").unwrap();
    assert_eq!(html(&tight, spans[0]), "custom");
}

#[test]
fn test_forced_attribute_syntax() {
    let options = Options::default().with_syntax(BindingSyntax::Attribute);
    let (mut tight, spans) = engine_with_options(&["flag:hidden:yes:no"], "data-binding", options);
    tight.set("flag", "").unwrap();
    assert_eq!(attr(&tight, spans[0], "hidden").as_deref(), Some("no"));
}

#[test]
fn test_rendered_html() {
    let doc = JsonMlDocument::from_json_ml(&json!(
        ["ul", null,
            ["li", {"data-binding": "items"}],
            ["li", {"data-binding": "meta"}]]
    ))
    .unwrap();
    let mut tight = Tight::new(doc);
    tight.set("items", json!([1, 2.5, "x"])).unwrap();
    tight.set("meta", json!({"a": 1})).unwrap();
    assert_eq!(
        tight.into_document().to_html(),
        r#"<ul><li data-binding="items">1,2.5,x</li><li data-binding="meta">{"a":1}</li></ul>"#
    );
}
