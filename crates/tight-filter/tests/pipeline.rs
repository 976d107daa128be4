use serde_json::{json, Value};
use std::collections::HashMap;
use tight_filter::{
    apply, Arity, Element, FilterCall, FilterCtx, FilterError, FilterRegistry,
};

#[derive(Default)]
struct FakeElement {
    attrs: HashMap<String, String>,
    html: String,
}

impl Element for FakeElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attrs.get(name).cloned()
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    fn inner_html(&self) -> String {
        self.html.clone()
    }
}

fn run(chain: &[FilterCall], value: Option<Value>) -> Result<Value, FilterError> {
    let registry = FilterRegistry::with_defaults();
    apply(&registry, chain, value, &mut FilterCtx::detached())
}

#[test]
fn test_chain_order_matters() {
    let upcase_then_replace = [
        FilterCall::new("upcase"),
        FilterCall::with_args("replace", ["A", "B"]),
    ];
    assert_eq!(run(&upcase_then_replace, Some(json!("cat"))), Ok(json!("CBT")));

    let replace_then_upcase = [
        FilterCall::with_args("replace", ["A", "B"]),
        FilterCall::new("upcase"),
    ];
    assert_eq!(run(&replace_then_upcase, Some(json!("cat"))), Ok(json!("CAT")));
}

#[test]
fn test_empty_chain_passes_value_through() {
    assert_eq!(run(&[], Some(json!(3))), Ok(json!(3)));
    assert_eq!(run(&[], Some(json!(null))), Ok(json!("")));
    assert_eq!(run(&[], None), Ok(json!("")));
}

#[test]
fn test_missing_value_is_coerced_before_filters() {
    assert_eq!(run(&[FilterCall::new("upcase")], None), Ok(json!("")));
    assert_eq!(run(&[FilterCall::new("upcase")], Some(json!(null))), Ok(json!("")));
}

#[test]
fn test_null_between_filters_is_coerced() {
    let chain = [FilterCall::new("first"), FilterCall::new("upcase")];
    assert_eq!(run(&chain, Some(json!([]))), Ok(json!("")));
}

#[test]
fn test_split_join_first_last() {
    let chain = [
        FilterCall::with_args("split", [","]),
        FilterCall::with_args("join", [" & "]),
    ];
    assert_eq!(run(&chain, Some(json!("a,b,c"))), Ok(json!("a & b & c")));

    let chain = [FilterCall::with_args("split", [" "]), FilterCall::new("last")];
    assert_eq!(run(&chain, Some(json!("Albert Einstein"))), Ok(json!("Einstein")));

    let chain = [FilterCall::with_args("split", [" "]), FilterCall::new("first")];
    assert_eq!(run(&chain, Some(json!("Albert Einstein"))), Ok(json!("Albert")));
}

#[test]
fn test_unknown_filter() {
    let err = run(&[FilterCall::new("shout")], Some(json!("x"))).unwrap_err();
    assert_eq!(err, FilterError::UnknownFilter("shout".to_string()));
    assert_eq!(err.to_string(), "filter 'shout' is not defined");
}

#[test]
fn test_argument_count() {
    let err = run(&[FilterCall::with_args("replace", ["a"])], Some(json!("x"))).unwrap_err();
    assert_eq!(
        err,
        FilterError::ArgumentCount {
            filter: "replace".to_string(),
            expected: "2 arguments".to_string(),
            given: 1,
        }
    );
    assert_eq!(err.to_string(), "filter 'replace' needs 2 arguments (given 1)");
}

#[test]
fn test_execution_error_is_wrapped() {
    let err = run(&[FilterCall::new("upcase")], Some(json!(42))).unwrap_err();
    match &err {
        FilterError::Execution { name, source } => {
            assert_eq!(name, "upcase");
            assert_eq!(**source, FilterError::NotString);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), "filter 'upcase' returned error: NOT_STRING");
}

#[test]
fn test_user_filter_error_is_wrapped() {
    let mut registry = FilterRegistry::with_defaults();
    registry.define("explode", |_, _, _| Err(FilterError::thrown("boom")));
    let err = apply(
        &registry,
        &[FilterCall::new("explode")],
        Some(json!("x")),
        &mut FilterCtx::detached(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "filter 'explode' returned error: boom");
}

#[test]
fn test_last_definition_wins() {
    let mut registry = FilterRegistry::with_defaults();
    registry.define("upcase", |_, _, _| Ok(json!("overridden")));
    let out = apply(
        &registry,
        &[FilterCall::new("upcase")],
        Some(json!("x")),
        &mut FilterCtx::detached(),
    );
    assert_eq!(out, Ok(json!("overridden")));
}

#[test]
fn test_user_filter_receives_args() {
    let mut registry = FilterRegistry::new();
    registry.define_with_arity("wrap", Arity::Fixed(2), |_, value, args| {
        Ok(Value::String(format!(
            "{}{}{}",
            args[0],
            value.as_str().unwrap_or_default(),
            args[1]
        )))
    });
    let out = apply(
        &registry,
        &[FilterCall::with_args("wrap", ["<", ">"])],
        Some(json!("x")),
        &mut FilterCtx::detached(),
    );
    assert_eq!(out, Ok(json!("<x>")));
}

#[test]
fn test_empty_name_is_ignored() {
    let mut registry = FilterRegistry::new();
    registry.define("", |_, value, _| Ok(value));
    assert!(registry.filters().is_empty());
}

#[test]
fn test_defaults_are_registered() {
    let registry = FilterRegistry::with_defaults();
    for name in [
        "attr",
        "upcase",
        "downcase",
        "replace",
        "replaceFirst",
        "split",
        "join",
        "first",
        "last",
    ] {
        assert!(registry.contains(name), "missing default filter {name}");
    }
}

#[test]
fn test_attr_sets_attribute_and_keeps_content() {
    let registry = FilterRegistry::with_defaults();
    let mut element = FakeElement {
        html: "caption".to_string(),
        ..Default::default()
    };
    let out = apply(
        &registry,
        &[FilterCall::with_args("attr", ["src"])],
        Some(json!("http://example.com/image.jpg")),
        &mut FilterCtx::new(&mut element),
    );
    assert_eq!(out, Ok(json!("caption")));
    assert_eq!(
        element.attribute("src").as_deref(),
        Some("http://example.com/image.jpg")
    );
}

#[test]
fn test_attr_toggle() {
    let registry = FilterRegistry::with_defaults();
    let chain = [FilterCall::with_args("attr", ["class", "on", "off"])];
    let mut element = FakeElement::default();

    apply(&registry, &chain, Some(json!(true)), &mut FilterCtx::new(&mut element)).unwrap();
    assert_eq!(element.attribute("class").as_deref(), Some("on"));

    apply(&registry, &chain, Some(json!(false)), &mut FilterCtx::new(&mut element)).unwrap();
    assert_eq!(element.attribute("class").as_deref(), Some("off"));

    // A missing value reaches the filter as "" and is falsy.
    apply(&registry, &chain, None, &mut FilterCtx::new(&mut element)).unwrap();
    assert_eq!(element.attribute("class").as_deref(), Some("off"));
}

#[test]
fn test_attr_without_element() {
    let err = run(&[FilterCall::with_args("attr", ["class"])], Some(json!("x"))).unwrap_err();
    assert!(matches!(
        err,
        FilterError::Execution { ref source, .. } if **source == FilterError::NoElement
    ));
}

#[test]
fn test_attr_arity() {
    let err = run(&[FilterCall::new("attr")], Some(json!("x"))).unwrap_err();
    assert_eq!(err.to_string(), "filter 'attr' needs 1 to 3 arguments (given 0)");
}
