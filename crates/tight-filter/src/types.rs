use crate::error::FilterError;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Number of string arguments a filter accepts (the piped value excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arity {
    /// Skip the arity check.
    Any,
    /// Exactly `n` arguments.
    Fixed(usize),
    /// Between `min` and `max` arguments. `None` for max = unlimited.
    Range(usize, Option<usize>),
}

impl Arity {
    pub fn accepts(&self, given: usize) -> bool {
        match *self {
            Arity::Any => true,
            Arity::Fixed(n) => given == n,
            Arity::Range(min, max) => given >= min && max.map_or(true, |max| given <= max),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn plural(n: usize) -> &'static str {
            if n == 1 {
                "argument"
            } else {
                "arguments"
            }
        }
        match *self {
            Arity::Any => f.write_str("any number of arguments"),
            Arity::Fixed(n) => write!(f, "{} {}", n, plural(n)),
            Arity::Range(min, None) => write!(f, "at least {} {}", min, plural(min)),
            Arity::Range(min, Some(max)) => write!(f, "{} to {} arguments", min, max),
        }
    }
}

/// Asserts that a filter invocation has the correct number of arguments.
pub fn assert_arity(filter: &str, arity: &Arity, given: usize) -> Result<(), FilterError> {
    if arity.accepts(given) {
        Ok(())
    } else {
        Err(FilterError::ArgumentCount {
            filter: filter.to_string(),
            expected: arity.to_string(),
            given,
        })
    }
}

/// The element a binding renders into, as seen by filters.
///
/// Implemented by the host document adapter; filters such as `attr` use it
/// for side effects on the bound element.
pub trait Element {
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&mut self, name: &str, value: &str);
    fn inner_html(&self) -> String;
}

/// Context handed to every filter invocation.
#[derive(Default)]
pub struct FilterCtx<'a> {
    /// The bound element, if the pipeline runs against one.
    pub element: Option<&'a mut dyn Element>,
}

impl<'a> FilterCtx<'a> {
    pub fn new(element: &'a mut dyn Element) -> Self {
        FilterCtx {
            element: Some(element),
        }
    }

    /// A context with no bound element.
    pub fn detached() -> Self {
        FilterCtx { element: None }
    }

    pub fn element(&mut self) -> Result<&mut (dyn Element + 'a), FilterError> {
        self.element.as_deref_mut().ok_or(FilterError::NoElement)
    }
}

/// Signature of a filter: piped value plus positional string arguments.
pub type FilterFn =
    dyn Fn(&mut FilterCtx<'_>, Value, &[String]) -> Result<Value, FilterError> + Send + Sync;

/// A registered filter.
#[derive(Clone)]
pub struct FilterDefinition {
    pub name: String,
    pub arity: Arity,
    pub apply: Arc<FilterFn>,
}

impl FilterDefinition {
    pub fn new<F>(name: impl Into<String>, arity: Arity, apply: F) -> Self
    where
        F: Fn(&mut FilterCtx<'_>, Value, &[String]) -> Result<Value, FilterError>
            + Send
            + Sync
            + 'static,
    {
        FilterDefinition {
            name: name.into(),
            arity,
            apply: Arc::new(apply),
        }
    }
}

impl fmt::Debug for FilterDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterDefinition")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Map of filter name -> definition.
pub type FilterMap = HashMap<String, Arc<FilterDefinition>>;

/// One `| name: "arg", ...` clause of a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCall {
    pub name: String,
    pub args: Vec<String>,
}

impl FilterCall {
    pub fn new(name: impl Into<String>) -> Self {
        FilterCall {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterCall {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}
