//! Error types for message evaluation and rendering.

use thiserror::Error;

use crate::parser::ParseError;
use crate::suggest::did_you_mean;

/// An error that occurred while evaluating a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A placeholder or block refers to a parameter that was not supplied.
    #[error("missing parameter '{name}'{}", did_you_mean(suggestions))]
    MissingParameter {
        name: String,
        suggestions: Vec<String>,
    },

    /// A parameter has a type the construct cannot use.
    #[error("parameter '{name}' must be a {expected}, got {found}")]
    InvalidParameterType {
        name: String,
        expected: &'static str,
        found: String,
    },

    /// A placeholder filter that is not registered.
    #[error("unknown filter '{name}'")]
    UnknownFilter { name: String },
}

/// Any failure while turning message text into output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}
