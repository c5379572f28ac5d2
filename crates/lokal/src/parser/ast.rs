//! Public AST types for compiled messages.
//!
//! These types are public so that policies and external tooling can inspect
//! or rewrite a message without re-implementing the grammar.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A compiled message: the sequence of nodes produced by the parser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub nodes: Vec<Node>,
}

/// A node within a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, already unquoted.
    Text(String),
    /// A parameter reference: `{name}` or `{name|filter|filter}`.
    Placeholder { name: String, filters: Vec<String> },
    /// `#` inside a plural branch.
    Pound,
    /// `{name, plural, ...}`
    Plural(PluralBlock),
    /// `{name, select, ...}`
    Select(SelectBlock),
}

/// A plural block. The `other` branch is mandatory and stored apart from the
/// selector branches.
#[derive(Debug, Clone, PartialEq)]
pub struct PluralBlock {
    pub argument: String,
    pub offset: i64,
    pub branches: Vec<(PluralSelector, Message)>,
    pub other: Message,
}

/// A select block. The `other` branch is mandatory and stored apart from the
/// keyed branches.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectBlock {
    pub argument: String,
    pub branches: Vec<(String, Message)>,
    pub other: Message,
}

/// A selector for a plural branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralSelector {
    /// `=N`: matches when the offset-adjusted count equals `N`.
    Exact(i64),
    /// A plural category keyword such as `one`.
    Category(PluralCategory),
}

/// Plural category keywords accepted by the parser.
///
/// All CLDR keywords parse so that translations written for other languages
/// stay valid, but evaluation only ever classifies a count as [`One`] or
/// [`Other`].
///
/// [`One`]: PluralCategory::One
/// [`Other`]: PluralCategory::Other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// Parse a category keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "zero" => Some(Self::Zero),
            "one" => Some(Self::One),
            "two" => Some(Self::Two),
            "few" => Some(Self::Few),
            "many" => Some(Self::Many),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// The keyword for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl Message {
    /// Create a message consisting of a single literal.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node::Text(text.into())],
        }
    }

    /// Returns true if the message has no placeholders or blocks.
    pub fn is_literal(&self) -> bool {
        self.nodes.iter().all(|node| matches!(node, Node::Text(_)))
    }

    /// Concatenated literal text of the message, including the literal text
    /// of every branch.
    pub fn literal_text(&self) -> String {
        let mut out = String::new();
        collect_literals(&self.nodes, &mut out);
        out
    }

    /// All argument names referenced anywhere in the message.
    pub fn arguments(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        collect_arguments(&self.nodes, &mut names);
        names
    }

    /// Returns the argument of a message that consists of a single plural
    /// block, optionally surrounded by whitespace.
    pub fn plural_argument(&self) -> Option<&str> {
        let mut blocks = self.nodes.iter().filter(|node| match node {
            Node::Text(text) => !text.trim().is_empty(),
            _ => true,
        });
        match (blocks.next(), blocks.next()) {
            (Some(Node::Plural(block)), None) => Some(block.argument.as_str()),
            _ => None,
        }
    }

    /// Returns a copy of this message with every literal passed through `f`.
    ///
    /// Placeholder names, keywords and selectors are left untouched.
    pub fn map_text(&self, f: &impl Fn(&str) -> String) -> Message {
        let nodes = self
            .nodes
            .iter()
            .map(|node| match node {
                Node::Text(text) => Node::Text(f(text)),
                Node::Plural(block) => Node::Plural(PluralBlock {
                    argument: block.argument.clone(),
                    offset: block.offset,
                    branches: block
                        .branches
                        .iter()
                        .map(|(selector, message)| (*selector, message.map_text(f)))
                        .collect(),
                    other: block.other.map_text(f),
                }),
                Node::Select(block) => Node::Select(SelectBlock {
                    argument: block.argument.clone(),
                    branches: block
                        .branches
                        .iter()
                        .map(|(selector, message)| (selector.clone(), message.map_text(f)))
                        .collect(),
                    other: block.other.map_text(f),
                }),
                other => other.clone(),
            })
            .collect();
        Message { nodes }
    }
}

fn collect_literals(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Plural(block) => {
                for (_, message) in &block.branches {
                    collect_literals(&message.nodes, out);
                }
                collect_literals(&block.other.nodes, out);
            }
            Node::Select(block) => {
                for (_, message) in &block.branches {
                    collect_literals(&message.nodes, out);
                }
                collect_literals(&block.other.nodes, out);
            }
            Node::Placeholder { .. } | Node::Pound => {}
        }
    }
}

fn collect_arguments<'a>(nodes: &'a [Node], names: &mut BTreeSet<&'a str>) {
    for node in nodes {
        match node {
            Node::Placeholder { name, .. } => {
                names.insert(name);
            }
            Node::Plural(block) => {
                names.insert(&block.argument);
                for (_, message) in &block.branches {
                    collect_arguments(&message.nodes, names);
                }
                collect_arguments(&block.other.nodes, names);
            }
            Node::Select(block) => {
                names.insert(&block.argument);
                for (_, message) in &block.branches {
                    collect_arguments(&message.nodes, names);
                }
                collect_arguments(&block.other.nodes, names);
            }
            Node::Text(_) | Node::Pound => {}
        }
    }
}

/// Prints the message back in canonical message syntax.
///
/// Literal braces are apostrophe-quoted and literal apostrophes doubled, so
/// parsing the printed form yields an equal AST.
impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write_nodes(f, &self.nodes, false)
    }
}

impl Display for PluralSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PluralSelector::Exact(n) => write!(f, "={n}"),
            PluralSelector::Category(category) => f.write_str(category.as_str()),
        }
    }
}

fn write_nodes(f: &mut Formatter<'_>, nodes: &[Node], in_plural: bool) -> FmtResult {
    for node in nodes {
        match node {
            Node::Text(text) => write_text(f, text, in_plural)?,
            Node::Placeholder { name, filters } => {
                write!(f, "{{{name}")?;
                for filter in filters {
                    write!(f, "|{filter}")?;
                }
                f.write_str("}")?;
            }
            Node::Pound => f.write_str("#")?,
            Node::Plural(block) => {
                write!(f, "{{{}, plural,", block.argument)?;
                if block.offset != 0 {
                    write!(f, " offset:{}", block.offset)?;
                }
                for (selector, message) in &block.branches {
                    write!(f, " {selector} {{")?;
                    write_nodes(f, &message.nodes, true)?;
                    f.write_str("}")?;
                }
                f.write_str(" other {")?;
                write_nodes(f, &block.other.nodes, true)?;
                f.write_str("}}")?;
            }
            Node::Select(block) => {
                write!(f, "{{{}, select,", block.argument)?;
                for (selector, message) in &block.branches {
                    write!(f, " {selector} {{")?;
                    write_nodes(f, &message.nodes, in_plural)?;
                    f.write_str("}")?;
                }
                f.write_str(" other {")?;
                write_nodes(f, &block.other.nodes, in_plural)?;
                f.write_str("}}")?;
            }
        }
    }
    Ok(())
}

/// Write literal text, quoting runs of syntax characters.
fn write_text(f: &mut Formatter<'_>, text: &str, in_plural: bool) -> FmtResult {
    let mut quoting = false;
    for c in text.chars() {
        let syntax = matches!(c, '{' | '}') || (in_plural && c == '#');
        if syntax && !quoting {
            f.write_str("'")?;
            quoting = true;
        } else if !syntax && quoting {
            f.write_str("'")?;
            quoting = false;
        }
        if c == '\'' {
            f.write_str("''")?;
        } else {
            write!(f, "{c}")?;
        }
    }
    if quoting {
        f.write_str("'")?;
    }
    Ok(())
}
