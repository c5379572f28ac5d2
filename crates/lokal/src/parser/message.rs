//! Message parser using winnow.
//!
//! Parses message strings into an AST. Handles:
//! - Literal text, with apostrophe quoting: `''` is a literal apostrophe and
//!   an apostrophe before a syntax character starts a quoted run
//! - Placeholders with optional filters: `{name}`, `{name|upper}`
//! - Plural blocks with `=N` and category selectors and an optional offset
//! - Select blocks
//! - `#` inside plural branches

use winnow::combinator::{alt, cut_err, fail, opt, repeat};
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use super::ast::{Message, Node, PluralBlock, PluralCategory, PluralSelector, SelectBlock};
use super::error::ParseError;
use crate::suggest::compute_suggestions;

/// Failure labels attached to cut errors and mapped back to [`ParseError`].
mod reason {
    pub(super) const UNTERMINATED: &str = "unterminated placeholder";
    pub(super) const UNKNOWN_KEYWORD: &str = "unknown keyword";
    pub(super) const MISSING_OTHER: &str = "missing other branch";
    pub(super) const INVALID_SELECTOR: &str = "invalid selector";
    pub(super) const DUPLICATE_SELECTOR: &str = "duplicate selector";
    pub(super) const EXPECTED_ARGUMENT: &str = "expected argument name";
    pub(super) const EXPECTED_KEYWORD: &str = "expected 'plural' or 'select'";
    pub(super) const EXPECTED_COMMA: &str = "expected ','";
    pub(super) const EXPECTED_CLOSE: &str = "expected '}'";
    pub(super) const EXPECTED_FILTER: &str = "expected filter name";
    pub(super) const EXPECTED_BRANCH: &str = "expected '{' after selector";
    pub(super) const INVALID_OFFSET: &str = "expected integer after 'offset:'";
}

const KEYWORDS: [&str; 2] = ["plural", "select"];

#[derive(Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Plural,
    Select,
}

/// Parse a message string into an AST.
pub fn parse_message(input: &str) -> Result<Message, ParseError> {
    let mut remaining = input;
    match nodes(&mut remaining, false) {
        Ok(nodes) if remaining.is_empty() => Ok(Message { nodes }),
        Ok(_) => {
            // The top level only stops early on a stray '}'.
            let (line, column) = calculate_position(input, remaining);
            Err(ParseError::UnbalancedBrace { line, column })
        }
        Err(e) => Err(classify(input, remaining, &e)),
    }
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed_str.rfind('\n') {
        Some(pos) => consumed_str[pos + 1..].chars().count() + 1,
        None => consumed_str.chars().count() + 1,
    };
    (line, column)
}

/// Map a winnow error back to a typed [`ParseError`].
///
/// Every rejection leaves the input positioned at the offending token, so the
/// token text is recovered from `remaining`.
fn classify(original: &str, remaining: &str, error: &ErrMode<ContextError>) -> ParseError {
    let (line, column) = calculate_position(original, remaining);
    let label = match error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e.context().find_map(|c| match c {
            StrContext::Label(label) => Some(*label),
            _ => None,
        }),
        ErrMode::Incomplete(_) => None,
    };
    match label {
        Some(reason::UNTERMINATED) => ParseError::UnterminatedPlaceholder { line, column },
        Some(reason::UNKNOWN_KEYWORD) => {
            let keyword = leading_token(remaining).to_string();
            let candidates: Vec<String> = KEYWORDS.iter().map(ToString::to_string).collect();
            ParseError::UnknownKeyword {
                suggestions: compute_suggestions(&keyword, &candidates),
                keyword,
                line,
                column,
            }
        }
        Some(reason::MISSING_OTHER) => ParseError::MissingOther {
            argument: leading_token(remaining.trim_start_matches('{').trim_start()).to_string(),
            line,
            column,
        },
        Some(reason::INVALID_SELECTOR) => ParseError::InvalidSelector {
            selector: leading_token(remaining).to_string(),
            line,
            column,
        },
        Some(reason::DUPLICATE_SELECTOR) => ParseError::Syntax {
            message: format!("duplicate selector '{}'", leading_token(remaining)),
            line,
            column,
        },
        Some(label) => ParseError::Syntax {
            message: label.to_string(),
            line,
            column,
        },
        None => ParseError::Syntax {
            message: format!("unexpected input '{}'", leading_token(remaining)),
            line,
            column,
        },
    }
}

/// The token at the start of `input`, up to whitespace or a syntax character.
fn leading_token(input: &str) -> &str {
    let end = input
        .find(|c: char| c.is_whitespace() || matches!(c, '{' | '}' | ','))
        .unwrap_or(input.len());
    &input[..end]
}

/// Fail with a cut error carrying `label`.
fn reject<O>(input: &mut &str, label: &'static str) -> ModalResult<O> {
    cut_err(fail::<_, O, _>)
        .context(StrContext::Label(label))
        .parse_next(input)
}

/// Like [`reject`], but reports an unterminated placeholder at end of input.
fn reject_or_unterminated<O>(input: &mut &str, label: &'static str) -> ModalResult<O> {
    if input.is_empty() {
        reject(input, reason::UNTERMINATED)
    } else {
        reject(input, label)
    }
}

/// Parse a sequence of nodes, stopping before `}` or at end of input.
fn nodes(input: &mut &str, in_plural: bool) -> ModalResult<Vec<Node>> {
    let nodes: Vec<Node> = repeat(
        0..,
        alt((
            |i: &mut &str| argument(i, in_plural),
            |i: &mut &str| apostrophe(i, in_plural),
            |i: &mut &str| pound(i, in_plural),
            |i: &mut &str| literal(i, in_plural),
        )),
    )
    .parse_next(input)?;

    Ok(merge_text(nodes))
}

/// Merge adjacent Text nodes into single nodes.
fn merge_text(nodes: Vec<Node>) -> Vec<Node> {
    let mut result = Vec::with_capacity(nodes.len());

    for node in nodes {
        match node {
            Node::Text(text) => {
                if let Some(Node::Text(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Node::Text(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

fn is_syntax_char(c: char, in_plural: bool) -> bool {
    matches!(c, '{' | '}' | '\'') || (in_plural && c == '#')
}

/// Parse a run of plain literal characters.
fn literal(input: &mut &str, in_plural: bool) -> ModalResult<Node> {
    take_while(1.., move |c: char| !is_syntax_char(c, in_plural))
        .map(|s: &str| Node::Text(s.to_string()))
        .parse_next(input)
}

/// Parse `#` inside a plural branch.
fn pound(input: &mut &str, in_plural: bool) -> ModalResult<Node> {
    if !in_plural {
        return fail(input);
    }
    '#'.value(Node::Pound).parse_next(input)
}

/// Parse an apostrophe: `''`, a quoted run, or a lone literal apostrophe.
///
/// A quoted run that is never closed extends to the end of the input.
fn apostrophe(input: &mut &str, in_plural: bool) -> ModalResult<Node> {
    '\''.parse_next(input)?;
    if opt('\'').parse_next(input)?.is_some() {
        return Ok(Node::Text("'".to_string()));
    }

    let opens_quote = input
        .chars()
        .next()
        .is_some_and(|c| c != '\'' && is_syntax_char(c, in_plural));
    if !opens_quote {
        return Ok(Node::Text("'".to_string()));
    }

    let mut quoted = String::new();
    while let Some(c) = opt(any).parse_next(input)? {
        if c == '\'' && opt('\'').parse_next(input)?.is_none() {
            break;
        }
        quoted.push(c);
    }
    Ok(Node::Text(quoted))
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}

/// Parse an argument or filter name.
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}

/// Parse a select key. Keys may also contain `-`.
fn selector_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '-').parse_next(input)
}

/// Parse a possibly negative integer.
fn integer(input: &mut &str) -> ModalResult<i64> {
    (opt('-'), take_while(1.., |c: char| c.is_ascii_digit()))
        .take()
        .try_map(str::parse::<i64>)
        .parse_next(input)
}

/// Consume a closing `}` after optional whitespace.
fn close(input: &mut &str) -> ModalResult<()> {
    ws(input)?;
    match input.chars().next() {
        Some('}') => '}'.void().parse_next(input),
        _ => reject_or_unterminated(input, reason::EXPECTED_CLOSE),
    }
}

/// Parse a placeholder or block, starting at `{`.
fn argument(input: &mut &str, in_plural: bool) -> ModalResult<Node> {
    let open = *input;
    '{'.parse_next(input)?;
    ws(input)?;

    let Some(name) = opt(identifier).parse_next(input)? else {
        return reject_or_unterminated(input, reason::EXPECTED_ARGUMENT);
    };
    let name = name.to_string();
    ws(input)?;

    match input.chars().next() {
        Some('}') => {
            '}'.parse_next(input)?;
            Ok(Node::Placeholder {
                name,
                filters: Vec::new(),
            })
        }
        Some('|') => {
            let filters = filters(input)?;
            close(input)?;
            Ok(Node::Placeholder { name, filters })
        }
        Some(',') => {
            ','.parse_next(input)?;
            block(input, name, open, in_plural)
        }
        _ => reject_or_unterminated(input, reason::EXPECTED_CLOSE),
    }
}

/// Parse `|filter|filter` after a placeholder name.
fn filters(input: &mut &str) -> ModalResult<Vec<String>> {
    let mut filters = Vec::new();
    while opt('|').parse_next(input)?.is_some() {
        ws(input)?;
        let Some(name) = opt(identifier).parse_next(input)? else {
            return reject_or_unterminated(input, reason::EXPECTED_FILTER);
        };
        filters.push(name.to_string());
        ws(input)?;
    }
    Ok(filters)
}

/// Parse the rest of a block after `{name,`.
///
/// `open` is the input at the block's opening brace, used to report a
/// missing `other` branch against the block as a whole.
fn block<'i>(
    input: &mut &'i str,
    argument: String,
    open: &'i str,
    in_plural: bool,
) -> ModalResult<Node> {
    ws(input)?;
    let keyword_start = *input;
    let Some(keyword) = opt(identifier).parse_next(input)? else {
        return reject_or_unterminated(input, reason::EXPECTED_KEYWORD);
    };
    let kind = match keyword {
        "plural" => BlockKind::Plural,
        "select" => BlockKind::Select,
        _ => {
            *input = keyword_start;
            return reject(input, reason::UNKNOWN_KEYWORD);
        }
    };

    ws(input)?;
    match input.chars().next() {
        Some(',') => ','.void().parse_next(input)?,
        _ => return reject_or_unterminated(input, reason::EXPECTED_COMMA),
    }
    ws(input)?;

    let node = match kind {
        BlockKind::Plural => {
            let offset = opt(offset).parse_next(input)?.unwrap_or(0);
            let (branches, other) = branches(input, true, plural_selector)?;
            other.map(|other| {
                Node::Plural(PluralBlock {
                    argument,
                    offset,
                    branches,
                    other,
                })
            })
        }
        BlockKind::Select => {
            let (branches, other) = branches(input, in_plural, select_selector)?;
            other.map(|other| {
                Node::Select(SelectBlock {
                    argument,
                    branches,
                    other,
                })
            })
        }
    };

    match node {
        Some(node) => Ok(node),
        None => {
            *input = open;
            reject(input, reason::MISSING_OTHER)
        }
    }
}

/// Parse `offset:N`.
fn offset(input: &mut &str) -> ModalResult<i64> {
    "offset:".parse_next(input)?;
    ws(input)?;
    match opt(integer).parse_next(input)? {
        Some(n) => Ok(n),
        None => reject_or_unterminated(input, reason::INVALID_OFFSET),
    }
}

/// A branch list: keyed branches plus the `other` branch, if present.
type Branches<S> = (Vec<(S, Message)>, Option<Message>);

/// Parse branches up to and including the block's closing `}`.
///
/// `selector` returns `None` for the `other` keyword.
fn branches<S: PartialEq>(
    input: &mut &str,
    in_plural: bool,
    selector: fn(&mut &str) -> ModalResult<Option<S>>,
) -> ModalResult<Branches<S>> {
    let mut keyed: Vec<(S, Message)> = Vec::new();
    let mut other = None;

    loop {
        ws(input)?;
        match input.chars().next() {
            Some('}') => break,
            None => return reject(input, reason::UNTERMINATED),
            Some(_) => {}
        }

        let selector_start = *input;
        let parsed = selector(input)?;
        let duplicate = match &parsed {
            Some(s) => keyed.iter().any(|(existing, _)| existing == s),
            None => other.is_some(),
        };
        if duplicate {
            *input = selector_start;
            return reject(input, reason::DUPLICATE_SELECTOR);
        }

        ws(input)?;
        match input.chars().next() {
            Some('{') => '{'.void().parse_next(input)?,
            _ => return reject_or_unterminated(input, reason::EXPECTED_BRANCH),
        }
        let body = Message {
            nodes: nodes(input, in_plural)?,
        };
        if input.is_empty() {
            return reject(input, reason::UNTERMINATED);
        }
        '}'.parse_next(input)?;

        match parsed {
            Some(s) => keyed.push((s, body)),
            None => other = Some(body),
        }
    }

    '}'.parse_next(input)?;
    Ok((keyed, other))
}

/// Parse a plural selector: `=N` or a category keyword.
fn plural_selector(input: &mut &str) -> ModalResult<Option<PluralSelector>> {
    let start = *input;
    if opt('=').parse_next(input)?.is_some() {
        return match opt(integer).parse_next(input)? {
            Some(n) => Ok(Some(PluralSelector::Exact(n))),
            None => {
                *input = start;
                reject(input, reason::INVALID_SELECTOR)
            }
        };
    }

    let keyword = opt(selector_name).parse_next(input)?;
    match keyword.and_then(PluralCategory::from_keyword) {
        Some(PluralCategory::Other) => Ok(None),
        Some(category) => Ok(Some(PluralSelector::Category(category))),
        None => {
            *input = start;
            reject(input, reason::INVALID_SELECTOR)
        }
    }
}

/// Parse a select key.
fn select_selector(input: &mut &str) -> ModalResult<Option<String>> {
    match opt(selector_name).parse_next(input)? {
        Some("other") => Ok(None),
        Some(name) => Ok(Some(name.to_string())),
        None => reject(input, reason::INVALID_SELECTOR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_counts_characters_not_bytes() {
        let input = "héllo\nwörld }";
        let remaining = &input[input.len() - 1..];
        assert_eq!(calculate_position(input, remaining), (2, 7));
    }

    #[test]
    fn leading_token_stops_at_syntax() {
        assert_eq!(leading_token("plurl, one {x}"), "plurl");
        assert_eq!(leading_token("onee {x}"), "onee");
        assert_eq!(leading_token(""), "");
    }

    #[test]
    fn merge_text_joins_adjacent_literals() {
        let merged = merge_text(vec![
            Node::Text("a".into()),
            Node::Text("b".into()),
            Node::Pound,
            Node::Text("c".into()),
        ]);
        assert_eq!(
            merged,
            vec![Node::Text("ab".into()), Node::Pound, Node::Text("c".into())]
        );
    }
}
