//! Source strings and the push payload built from them.

use std::collections::BTreeMap;

use bon::bon;
use serde::Serialize;
use thiserror::Error;

use super::{Labels, Metadata};

/// An error constructing a [`SourceString`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The source text is empty.
    #[error("source string must not be empty")]
    EmptyString,

    /// A character limit of zero or less.
    #[error("character limit must be positive, got {limit}")]
    NonPositiveCharacterLimit { limit: i64 },

    /// A reserved metadata parameter with a value of the wrong shape.
    #[error("invalid value '{value}' for metadata '{key}'")]
    InvalidMetadata { key: String, value: String },
}

/// A translatable string as authored in the source language, with its key
/// and developer-facing metadata.
///
/// Construction normalizes every label set and fixes the key. Context is
/// part of the string's [identity](SourceString::identity): the same text
/// under two contexts is two strings. The other metadata never affects
/// rendering or lookup.
///
/// ```
/// use lokal::SourceString;
///
/// let s = SourceString::builder()
///     .string("Hello {name}")
///     .context("greeting, greeting")
///     .character_limit(20)
///     .build()
///     .unwrap();
/// assert_eq!(s.key(), "Hello {name}");
/// assert_eq!(s.context().as_slice(), ["greeting"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceString {
    string: String,
    key: String,
    context: Labels,
    comment: Option<String>,
    character_limit: Option<i64>,
    tags: Labels,
    occurrences: Labels,
}

#[bon]
impl SourceString {
    /// Validate and build a source string. The key defaults to the string.
    ///
    /// # Errors
    ///
    /// Returns an error if `string` is empty or `character_limit` is not
    /// positive.
    #[builder]
    pub fn new(
        #[builder(into)] string: String,
        #[builder(into)] key: Option<String>,
        #[builder(into)] context: Option<Labels>,
        #[builder(into)] comment: Option<String>,
        character_limit: Option<i64>,
        #[builder(into)] tags: Option<Labels>,
        #[builder(into)] occurrences: Option<Labels>,
    ) -> Result<Self, ValidationError> {
        if string.is_empty() {
            return Err(ValidationError::EmptyString);
        }
        if let Some(limit) = character_limit
            && limit <= 0
        {
            return Err(ValidationError::NonPositiveCharacterLimit { limit });
        }

        Ok(Self {
            key: key.filter(|k| !k.is_empty()).unwrap_or_else(|| string.clone()),
            string,
            context: context.unwrap_or_default(),
            comment: comment.filter(|c| !c.is_empty()),
            character_limit,
            tags: tags.unwrap_or_default(),
            occurrences: occurrences.unwrap_or_default(),
        })
    }
}

impl SourceString {
    /// Build a source string from metadata supplied as reserved parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is invalid or a metadata value has the
    /// wrong shape.
    pub fn from_metadata(
        string: impl Into<String>,
        key: Option<String>,
        metadata: &Metadata,
    ) -> Result<Self, ValidationError> {
        SourceString::builder()
            .string(string)
            .maybe_key(key)
            .maybe_context(metadata.context())
            .maybe_comment(metadata.comment())
            .maybe_character_limit(metadata.character_limit()?)
            .maybe_tags(metadata.tags())
            .maybe_occurrences(metadata.occurrences())
            .build()
    }

    /// The message text in the source language.
    pub fn string(&self) -> &str {
        &self.string
    }

    /// The stable identifier of this string.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The key and context that together tell this string apart from others
    /// with the same text. See [`identity_key`].
    pub fn identity(&self) -> String {
        identity_key(&self.key, &self.context)
    }

    pub fn context(&self) -> &Labels {
        &self.context
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn character_limit(&self) -> Option<i64> {
        self.character_limit
    }

    pub fn tags(&self) -> &Labels {
        &self.tags
    }

    pub fn occurrences(&self) -> &Labels {
        &self.occurrences
    }

    /// Merge metadata from another occurrence of the same string.
    ///
    /// Fields set on `other` replace ours, fields it leaves unset keep their
    /// current value, and tags and occurrences are unioned. The string, key
    /// and context are not touched.
    pub fn merge(&mut self, other: &SourceString) {
        if other.comment.is_some() {
            self.comment.clone_from(&other.comment);
        }
        if other.character_limit.is_some() {
            self.character_limit = other.character_limit;
        }
        self.tags.extend(other.tags.iter());
        self.occurrences.extend(other.occurrences.iter());
    }

    /// Project this string into its push representation.
    pub fn to_payload(&self) -> SourcePayload {
        SourcePayload {
            string: self.string.clone(),
            key: self.key.clone(),
            meta: PayloadMeta {
                context: self.context.clone(),
                developer_comment: self.comment.clone(),
                character_limit: self.character_limit,
                tags: self.tags.clone(),
                occurrences: self.occurrences.clone(),
            },
        }
    }
}

/// Join a key with its context labels: `key` alone without context,
/// otherwise `key:ctx1:ctx2`.
///
/// This is the key source strings are pushed under and translations are
/// looked up by.
///
/// ```
/// use lokal::{Labels, identity_key};
///
/// assert_eq!(identity_key("Open", &Labels::default()), "Open");
/// assert_eq!(identity_key("Open", &Labels::from("menu,file")), "Open:menu:file");
/// ```
pub fn identity_key(key: &str, context: &Labels) -> String {
    if context.is_empty() {
        return key.to_string();
    }
    let mut identity = key.to_string();
    for label in context.iter() {
        identity.push(':');
        identity.push_str(label);
    }
    identity
}

/// The push representation of one source string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourcePayload {
    pub string: String,
    pub key: String,
    pub meta: PayloadMeta,
}

/// Metadata section of a [`SourcePayload`]. Empty fields are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadMeta {
    #[serde(skip_serializing_if = "Labels::is_empty")]
    pub context: Labels,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_limit: Option<i64>,
    #[serde(skip_serializing_if = "Labels::is_empty")]
    pub tags: Labels,
    #[serde(skip_serializing_if = "Labels::is_empty")]
    pub occurrences: Labels,
}

/// The body of a push request: every string keyed by its identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushPayload {
    pub data: BTreeMap<String, SourcePayload>,
    pub meta: PushMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PushMeta {
    /// Remove remote strings that are not part of this push.
    pub purge: bool,
}

/// A collection of source strings with unique identities.
///
/// Adding a string whose key and context are already present merges its
/// metadata into the existing entry. The same key under a different context
/// is a separate entry. Iteration follows first insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceStringSet {
    strings: Vec<SourceString>,
}

impl SourceStringSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string, merging it into an existing entry with the same key
    /// and context.
    pub fn insert(&mut self, string: SourceString) {
        let existing = self
            .strings
            .iter_mut()
            .find(|s| s.key == string.key && s.context == string.context);
        match existing {
            Some(existing) => existing.merge(&string),
            None => self.strings.push(string),
        }
    }

    /// Look up a string by its key and context.
    pub fn get(&self, key: &str, context: &Labels) -> Option<&SourceString> {
        self.strings
            .iter()
            .find(|s| s.key == key && &s.context == context)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceString> {
        self.strings.iter()
    }

    /// Build the push request body for every string in the set.
    pub fn push_payload(&self, purge: bool) -> PushPayload {
        PushPayload {
            data: self
                .strings
                .iter()
                .map(|s| (s.identity(), s.to_payload()))
                .collect(),
            meta: PushMeta { purge },
        }
    }
}

impl FromIterator<SourceString> for SourceStringSet {
    fn from_iter<T: IntoIterator<Item = SourceString>>(iter: T) -> Self {
        let mut set = SourceStringSet::new();
        for string in iter {
            set.insert(string);
        }
        set
    }
}

impl Extend<SourceString> for SourceStringSet {
    fn extend<T: IntoIterator<Item = SourceString>>(&mut self, iter: T) {
        for string in iter {
            self.insert(string);
        }
    }
}
