use std::collections::BTreeMap;
use std::collections::btree_map::Iter;

use super::{Labels, ValidationError, Value};

/// Parameter names that carry source string metadata rather than values.
pub const RESERVED_KEYS: [&str; 5] = ["_context", "_comment", "_charlimit", "_tags", "_occurrences"];

/// Render parameters: placeholder values plus any reserved metadata.
///
/// Reserved keys never become placeholders. Inserting one stores it in
/// [`Metadata`] instead, so `{_context}` in a message is always a missing
/// parameter.
///
/// ```
/// use lokal::params;
///
/// let p = params! { "count" => 3, "_context" => "menu" };
/// assert_eq!(p.len(), 1);
/// assert!(p.get("_context").is_none());
/// assert_eq!(p.metadata().context().unwrap().as_slice(), ["menu"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: BTreeMap<String, Value>,
    metadata: Metadata,
}

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, diverting reserved keys into the metadata.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if is_reserved(&name) {
            self.metadata.entries.insert(name, value);
        } else {
            self.values.insert(name, value);
        }
    }

    /// Look up a placeholder value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns true if a placeholder value is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of placeholder values. Metadata is not counted.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no placeholder values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Placeholder names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Placeholder values in name order.
    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.values.iter()
    }

    /// Reserved metadata supplied alongside the values.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Returns true if `name` is one of [`RESERVED_KEYS`].
pub fn is_reserved(name: &str) -> bool {
    RESERVED_KEYS.contains(&name)
}

/// Source string metadata extracted from reserved parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: BTreeMap<String, Value>,
}

impl Metadata {
    /// Returns true if no reserved key was supplied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The raw value supplied for a reserved key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// `_context`, normalized.
    pub fn context(&self) -> Option<Labels> {
        self.labels("_context")
    }

    /// `_comment`.
    pub fn comment(&self) -> Option<String> {
        self.entries.get("_comment").map(ToString::to_string)
    }

    /// `_tags`, normalized.
    pub fn tags(&self) -> Option<Labels> {
        self.labels("_tags")
    }

    /// `_occurrences`, normalized.
    pub fn occurrences(&self) -> Option<Labels> {
        self.labels("_occurrences")
    }

    /// `_charlimit` as an integer.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidMetadata`] if the value is not a
    /// whole number.
    pub fn character_limit(&self) -> Result<Option<i64>, ValidationError> {
        let Some(value) = self.entries.get("_charlimit") else {
            return Ok(None);
        };
        match value.as_count() {
            Some(limit) => Ok(Some(limit)),
            None => Err(ValidationError::InvalidMetadata {
                key: "_charlimit".to_string(),
                value: value.to_string(),
            }),
        }
    }

    fn labels(&self, key: &str) -> Option<Labels> {
        self.entries
            .get(key)
            .map(|value| Labels::from(value.to_string()))
    }
}
