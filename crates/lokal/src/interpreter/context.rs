//! Evaluation context for tracking state during recursive evaluation.

use crate::types::{Params, Value};

/// Evaluation context carrying state through recursive evaluation.
///
/// The context tracks:
/// - Parameters available during evaluation
/// - Whether literal text and substituted values are HTML-escaped
/// - The values of enclosing plural blocks, innermost last, for `#`
pub struct EvalContext<'a> {
    params: &'a Params,
    escape_output: bool,
    escape_params: bool,
    plural_stack: Vec<&'a Value>,
}

impl<'a> EvalContext<'a> {
    /// Create a context that escapes nothing.
    pub fn new(params: &'a Params) -> Self {
        Self::with_escaping(params, false, false)
    }

    /// Create a context with explicit escaping decisions.
    ///
    /// `escape_output` applies to the message's literal text, and
    /// `escape_params` to every substituted value not marked safe.
    pub fn with_escaping(params: &'a Params, escape_output: bool, escape_params: bool) -> Self {
        Self {
            params,
            escape_output,
            escape_params,
            plural_stack: Vec::new(),
        }
    }

    /// Get a parameter value.
    pub fn get_param(&self, name: &str) -> Option<&'a Value> {
        self.params.get(name)
    }

    /// All parameter names, for suggestions.
    pub fn param_names(&self) -> Vec<String> {
        self.params.names().map(ToString::to_string).collect()
    }

    pub fn escape_output(&self) -> bool {
        self.escape_output
    }

    pub fn escape_params(&self) -> bool {
        self.escape_params
    }

    /// Enter a plural branch selected by `value`.
    pub fn push_plural(&mut self, value: &'a Value) {
        self.plural_stack.push(value);
    }

    /// Leave the innermost plural branch.
    pub fn pop_plural(&mut self) {
        self.plural_stack.pop();
    }

    /// The value of the innermost enclosing plural block.
    pub fn current_plural(&self) -> Option<&'a Value> {
        self.plural_stack.last().copied()
    }
}
