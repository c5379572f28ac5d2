//! Message interpreter.
//!
//! This module provides the evaluation engine that takes parsed messages
//! and produces formatted strings, the compiled-message cache, and static
//! checks over translations.

mod cache;
mod context;
mod error;
mod evaluator;
mod filters;
mod lint;
mod plural;

pub use cache::MessageCache;
pub use context::EvalContext;
pub use error::{EvalError, RenderError};
pub use evaluator::eval_message;
pub use filters::{FilterFn, FilterRegistry};
pub use lint::{TranslationWarning, lint_translation};
pub use plural::plural_category;
