//! Message evaluation engine.
//!
//! Walks a parsed message with a parameter set and produces the output
//! text. Literal text and substituted values are escaped according to the
//! context. Plural and select blocks choose a branch and recurse into it
//! with the same parameters.

use crate::escape::html_escape;
use crate::interpreter::plural::plural_category;
use crate::interpreter::{EvalContext, EvalError, FilterRegistry};
use crate::parser::ast::{Message, Node, PluralBlock, PluralSelector, SelectBlock};
use crate::suggest::compute_suggestions;
use crate::types::Value;

/// Evaluate a message AST, producing a formatted string.
///
/// # Errors
///
/// Returns an error if:
/// - A referenced parameter is missing
/// - A plural argument is not numeric
/// - A placeholder uses an unknown filter
pub fn eval_message(
    message: &Message,
    ctx: &mut EvalContext<'_>,
    filters: &FilterRegistry,
) -> Result<String, EvalError> {
    let mut output = String::new();
    eval_nodes(&message.nodes, ctx, filters, &mut output)?;
    Ok(output)
}

fn eval_nodes(
    nodes: &[Node],
    ctx: &mut EvalContext<'_>,
    filters: &FilterRegistry,
    output: &mut String,
) -> Result<(), EvalError> {
    for node in nodes {
        match node {
            Node::Text(text) => {
                if ctx.escape_output() {
                    output.push_str(&html_escape(text));
                } else {
                    output.push_str(text);
                }
            }
            Node::Placeholder {
                name,
                filters: names,
            } => {
                let value = resolve_param(name, ctx)?;
                let text = filters.apply(value.to_string(), names)?;
                if ctx.escape_params() && !value.is_safe() {
                    output.push_str(&html_escape(&text));
                } else {
                    output.push_str(&text);
                }
            }
            // Outside any plural block `#` is plain text.
            Node::Pound => match ctx.current_plural().and_then(Value::number_text) {
                Some(number) => output.push_str(&number),
                None => output.push('#'),
            },
            Node::Plural(block) => eval_plural(block, ctx, filters, output)?,
            Node::Select(block) => eval_select(block, ctx, filters, output)?,
        }
    }
    Ok(())
}

/// Look up a parameter, suggesting close names when it is missing.
fn resolve_param<'a>(name: &str, ctx: &EvalContext<'a>) -> Result<&'a Value, EvalError> {
    ctx.get_param(name)
        .ok_or_else(|| EvalError::MissingParameter {
            name: name.to_string(),
            suggestions: compute_suggestions(name, &ctx.param_names()),
        })
}

/// Evaluate a plural block.
///
/// Branch selection uses the count minus the offset: exact `=N` branches
/// are tried first, then the count's category, then `other`. Inside the
/// chosen branch `#` renders the argument's raw value.
fn eval_plural(
    block: &PluralBlock,
    ctx: &mut EvalContext<'_>,
    filters: &FilterRegistry,
    output: &mut String,
) -> Result<(), EvalError> {
    let value = resolve_param(&block.argument, ctx)?;
    let count = value
        .as_f64()
        .ok_or_else(|| EvalError::InvalidParameterType {
            name: block.argument.clone(),
            expected: "number",
            found: value.type_name().to_string(),
        })?;
    let adjusted = count - block.offset as f64;

    let exact = block.branches.iter().find(|(selector, _)| match selector {
        PluralSelector::Exact(n) => *n as f64 == adjusted,
        PluralSelector::Category(_) => false,
    });
    let branch = exact
        .or_else(|| {
            let category = plural_category(adjusted);
            block
                .branches
                .iter()
                .find(|(selector, _)| *selector == PluralSelector::Category(category))
        })
        .map_or(&block.other, |(_, message)| message);

    ctx.push_plural(value);
    let result = eval_nodes(&branch.nodes, ctx, filters, output);
    ctx.pop_plural();
    result
}

/// Evaluate a select block, matching the argument's text against the keys.
fn eval_select(
    block: &SelectBlock,
    ctx: &mut EvalContext<'_>,
    filters: &FilterRegistry,
    output: &mut String,
) -> Result<(), EvalError> {
    let key = resolve_param(&block.argument, ctx)?.to_string();
    let branch = block
        .branches
        .iter()
        .find(|(selector, _)| *selector == key)
        .map_or(&block.other, |(_, message)| message);
    eval_nodes(&branch.nodes, ctx, filters, output)
}
