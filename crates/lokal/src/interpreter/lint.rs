//! Static checks comparing a translation with its source message.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::parser::ast::{Message, Node};

/// A problem found by [`lint_translation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationWarning {
    /// The translation references an argument the source never uses. It
    /// will fail to render with the parameters the source is given.
    UnknownArgument { name: String },

    /// The source uses an argument the translation drops.
    UnusedArgument { name: String },

    /// The source pluralizes on an argument the translation does not.
    MissingPlural { argument: String },
}

impl Display for TranslationWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TranslationWarning::UnknownArgument { name } => {
                write!(f, "translation uses '{name}', which the source does not define")
            }
            TranslationWarning::UnusedArgument { name } => {
                write!(f, "translation never uses '{name}'")
            }
            TranslationWarning::MissingPlural { argument } => {
                write!(f, "translation has no plural block on '{argument}'")
            }
        }
    }
}

/// Compare the arguments and plural blocks of a translation against its
/// source, returning warnings in a stable order.
pub fn lint_translation(source: &Message, translation: &Message) -> Vec<TranslationWarning> {
    let source_args = source.arguments();
    let translation_args = translation.arguments();

    let mut warnings: Vec<TranslationWarning> = translation_args
        .difference(&source_args)
        .map(|name| TranslationWarning::UnknownArgument {
            name: (*name).to_string(),
        })
        .collect();
    warnings.extend(source_args.difference(&translation_args).map(|name| {
        TranslationWarning::UnusedArgument {
            name: (*name).to_string(),
        }
    }));

    let translation_plurals = plural_arguments(translation);
    warnings.extend(
        plural_arguments(source)
            .difference(&translation_plurals)
            .map(|argument| TranslationWarning::MissingPlural {
                argument: (*argument).to_string(),
            }),
    );
    warnings
}

fn plural_arguments(message: &Message) -> BTreeSet<&str> {
    let mut names = BTreeSet::new();
    collect_plurals(&message.nodes, &mut names);
    names
}

fn collect_plurals<'a>(nodes: &'a [Node], names: &mut BTreeSet<&'a str>) {
    for node in nodes {
        match node {
            Node::Plural(block) => {
                names.insert(&block.argument);
                for (_, message) in &block.branches {
                    collect_plurals(&message.nodes, names);
                }
                collect_plurals(&block.other.nodes, names);
            }
            Node::Select(block) => {
                for (_, message) in &block.branches {
                    collect_plurals(&message.nodes, names);
                }
                collect_plurals(&block.other.nodes, names);
            }
            Node::Text(_) | Node::Placeholder { .. } | Node::Pound => {}
        }
    }
}
