use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("filter '{filter}' needs {expected} (given {given})")]
    ArgumentCount {
        filter: String,
        expected: String,
        given: usize,
    },

    #[error("filter '{0}' is not defined")]
    UnknownFilter(String),

    #[error("filter '{name}' returned error: {source}")]
    Execution {
        name: String,
        #[source]
        source: Box<FilterError>,
    },

    #[error("NOT_STRING")]
    NotString,

    #[error("NOT_ARRAY")]
    NotArray,

    #[error("invalid pattern: {0}")]
    Pattern(String),

    #[error("filter needs a bound element")]
    NoElement,

    #[error("{0}")]
    Thrown(String),
}

impl FilterError {
    /// Error raised from inside a user-defined filter.
    pub fn thrown(message: impl Into<String>) -> Self {
        FilterError::Thrown(message.into())
    }
}
