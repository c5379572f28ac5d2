//! Message parser.
//!
//! Parses message strings into an AST that the evaluator walks and that
//! policies and external tooling can inspect.

pub mod ast;
pub mod error;
mod message;

pub use ast::*;
pub use error::ParseError;
pub use message::parse_message;
