//! Missing-translation policies.
//!
//! A missing policy turns a source message into the text rendered when no
//! translation exists. Its output is message text: it is parsed and
//! evaluated like a translation, so the built-in policies rewrite literal
//! text only and quote the markers they add.

use std::sync::Arc;

use crate::parser::{Message, parse_message};

/// Produces substitute message text when a translation is missing.
///
/// Any `Fn(&str, &str) -> String` closure taking the source text and the
/// target language is a policy.
pub trait MissingPolicy: Send + Sync {
    fn get_text(&self, source: &str, language: &str) -> String;
}

impl<F> MissingPolicy for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn get_text(&self, source: &str, language: &str) -> String {
        self(source, language)
    }
}

/// Apply `f` to every literal in `source`, or to the whole string if it is
/// not a valid message.
fn map_literals(source: &str, f: impl Fn(&str) -> String) -> String {
    match parse_message(source) {
        Ok(message) => message.map_text(&f).to_string(),
        Err(_) => f(source),
    }
}

/// Message text that renders as exactly `text`.
fn quote_literal(text: &str) -> String {
    Message::text(text).to_string()
}

/// Returns the source text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceStringPolicy;

impl MissingPolicy for SourceStringPolicy {
    fn get_text(&self, source: &str, _language: &str) -> String {
        source.to_string()
    }
}

/// Replaces ASCII letters with accented look-alikes so untranslated text
/// stands out while staying readable.
///
/// ```
/// use lokal::{MissingPolicy, PseudoTranslationPolicy};
///
/// let policy = PseudoTranslationPolicy;
/// assert_eq!(policy.get_text("Source", "fr"), "Șøüȓċê");
/// assert_eq!(policy.get_text("Hi {name}", "fr"), "Ȟı {name}");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PseudoTranslationPolicy;

const PSEUDO_UPPER: [char; 26] = [
    'Å', 'Ɓ', 'Ċ', 'Đ', 'Ȅ', 'Ḟ', 'Ġ', 'Ȟ', 'İ', 'Ĵ', 'Ǩ', 'Ĺ', 'Ṁ', 'Ñ', 'Ò', 'Ƥ', 'Ꝗ', 'Ȓ', 'Ș',
    'Ť', 'Ü', 'Ṽ', 'Ẃ', 'Ẍ', 'Ẏ', 'Ž',
];

const PSEUDO_LOWER: [char; 26] = [
    'à', 'ƀ', 'ċ', 'đ', 'ê', 'ƒ', 'ğ', 'ȟ', 'ı', 'ǰ', 'ǩ', 'ĺ', 'ɱ', 'ñ', 'ø', 'ƥ', 'ʠ', 'ȓ', 'š',
    'ť', 'ü', 'ṽ', 'ẁ', 'ẋ', 'ÿ', 'ź',
];

impl PseudoTranslationPolicy {
    /// Transliterate a single piece of text.
    pub fn pseudo(text: &str) -> String {
        text.chars()
            .map(|c| match c {
                'A'..='Z' => PSEUDO_UPPER[usize::from(c as u8 - b'A')],
                'a'..='z' => PSEUDO_LOWER[usize::from(c as u8 - b'a')],
                other => other,
            })
            .collect()
    }
}

impl MissingPolicy for PseudoTranslationPolicy {
    fn get_text(&self, source: &str, _language: &str) -> String {
        map_literals(source, Self::pseudo)
    }
}

/// Wraps the source text in start and end markers, `[` and `]` by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedStringPolicy {
    start: String,
    end: String,
}

impl WrappedStringPolicy {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl Default for WrappedStringPolicy {
    fn default() -> Self {
        Self::new("[", "]")
    }
}

impl MissingPolicy for WrappedStringPolicy {
    fn get_text(&self, source: &str, _language: &str) -> String {
        format!(
            "{}{source}{}",
            quote_literal(&self.start),
            quote_literal(&self.end)
        )
    }
}

/// Appends filler to lengthen the source text by a percentage of its
/// character count, rounded up. The filler repeats `extra_str` and is
/// truncated to length. Percentages above
/// [`MAX_PERCENTAGE`](Self::MAX_PERCENTAGE) are treated as that maximum.
///
/// ```
/// use lokal::{ExtraLengthPolicy, MissingPolicy};
///
/// assert_eq!(ExtraLengthPolicy::default().get_text("Source", "de"), "Source~e");
/// assert_eq!(ExtraLengthPolicy::new(0.8, "$").get_text("Source", "de"), "Source$$$$$");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraLengthPolicy {
    extra_percentage: f64,
    extra_str: String,
}

impl ExtraLengthPolicy {
    /// The largest share of extra text, as a multiple of the source length.
    pub const MAX_PERCENTAGE: f64 = 10.0;

    pub fn new(extra_percentage: f64, extra_str: impl Into<String>) -> Self {
        Self {
            extra_percentage,
            extra_str: extra_str.into(),
        }
    }

    /// The filler appended to text of `length` characters.
    fn filler(&self, length: usize) -> String {
        if self.extra_percentage.is_nan() {
            return String::new();
        }
        let percentage = self.extra_percentage.min(Self::MAX_PERCENTAGE);
        let wanted = (length as f64 * percentage).ceil();
        if wanted < 1.0 {
            return String::new();
        }
        self.extra_str
            .chars()
            .cycle()
            .take(wanted as usize)
            .collect()
    }
}

impl Default for ExtraLengthPolicy {
    fn default() -> Self {
        Self::new(0.3, "~extra~")
    }
}

impl MissingPolicy for ExtraLengthPolicy {
    fn get_text(&self, source: &str, _language: &str) -> String {
        let filler = self.filler(source.chars().count());
        if filler.is_empty() {
            return source.to_string();
        }
        format!("{source}{}", quote_literal(&filler))
    }
}

/// Applies policies in order, feeding each one the previous one's output.
#[derive(Clone, Default)]
pub struct ChainedPolicy {
    policies: Vec<Arc<dyn MissingPolicy>>,
}

impl ChainedPolicy {
    pub fn new(policies: Vec<Arc<dyn MissingPolicy>>) -> Self {
        Self { policies }
    }

    /// Append a policy to the chain.
    pub fn then(mut self, policy: impl MissingPolicy + 'static) -> Self {
        self.policies.push(Arc::new(policy));
        self
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl MissingPolicy for ChainedPolicy {
    fn get_text(&self, source: &str, language: &str) -> String {
        self.policies
            .iter()
            .fold(source.to_string(), |text, policy| {
                policy.get_text(&text, language)
            })
    }
}
