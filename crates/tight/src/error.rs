use thiserror::Error;
use tight_binding::ParseError;
use tight_filter::FilterError;
use tight_path::PathError;

use crate::dom::JsonMlError;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Syntax(#[from] ParseError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("compute can't handle cyclic references ({target} via {via})")]
    CyclicCompute { target: String, via: String },

    #[error("dispatch depth limit {limit} exceeded while setting '{path}'")]
    DispatchDepth { limit: usize, path: String },

    #[error(transparent)]
    JsonMl(#[from] JsonMlError),

    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),
}
