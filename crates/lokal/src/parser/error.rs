//! Parse error types for messages.

use thiserror::Error;

/// An error that occurred while parsing a message.
///
/// Every variant carries the 1-based line and column where parsing stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `}` with no matching `{`.
    #[error("unbalanced '}}' at {line}:{column}")]
    UnbalancedBrace { line: usize, column: usize },

    /// Input ended inside a placeholder or block.
    #[error("unterminated placeholder at {line}:{column}")]
    UnterminatedPlaceholder { line: usize, column: usize },

    /// A block keyword other than `plural` or `select`.
    #[error("unknown keyword '{keyword}' at {line}:{column}, expected 'plural' or 'select'")]
    UnknownKeyword {
        keyword: String,
        suggestions: Vec<String>,
        line: usize,
        column: usize,
    },

    /// A plural or select block without an `other` branch.
    #[error("block on '{argument}' at {line}:{column} has no 'other' branch")]
    MissingOther {
        argument: String,
        line: usize,
        column: usize,
    },

    /// A branch selector that is not valid for its block.
    #[error("invalid selector '{selector}' at {line}:{column}")]
    InvalidSelector {
        selector: String,
        line: usize,
        column: usize,
    },

    /// Any other syntax error.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    /// The `(line, column)` where parsing failed.
    pub fn position(&self) -> (usize, usize) {
        match self {
            ParseError::UnbalancedBrace { line, column }
            | ParseError::UnterminatedPlaceholder { line, column }
            | ParseError::UnknownKeyword { line, column, .. }
            | ParseError::MissingOther { line, column, .. }
            | ParseError::InvalidSelector { line, column, .. }
            | ParseError::Syntax { line, column, .. } => (*line, *column),
        }
    }
}
