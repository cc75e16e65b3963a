use std::num::ParseFloatError;

use thiserror::Error;

use crate::function::tabulatedfunction::tabulatedfunctionerror::TabulatedFunctionError;

/// Failures while writing or restoring a tabulated function.
///
/// Text-format variants carry the 1-based line number of the offending
/// input line.
#[derive(Debug, Error)]
pub enum FunctionIoError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Function(#[from] TabulatedFunctionError),

    #[error("stream ended after {read} of {expected} bytes")]
    Truncated {
        expected: usize,
        read: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("no factory builds '{name}'")]
    UnknownBackend { name: String },

    #[error("invalid point count {count}")]
    InvalidPointCount { count: i64 },

    #[error("input is empty, expected a point count")]
    MissingCount,

    #[error("line {line}: invalid point count '{token}'")]
    InvalidCount { line: usize, token: String },

    #[error("line {line}: expected 'x y', found '{content}'")]
    MalformedLine { line: usize, content: String },

    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber {
        line: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("line {line}: input ended, {expected} more point(s) expected")]
    UnexpectedEnd { line: usize, expected: usize },
}
