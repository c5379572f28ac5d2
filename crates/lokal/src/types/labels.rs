use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// An ordered set of metadata labels, used for context, tags and
/// occurrences.
///
/// Labels are normalized on construction: each one is trimmed, empty labels
/// are dropped and duplicates keep their first position. Every input is
/// split on commas, so the comma-joined [`Display`] form always reads back
/// as the same set.
///
/// ```
/// use lokal::Labels;
///
/// let labels = Labels::from("a, a, ,b");
/// assert_eq!(labels.as_slice(), ["a", "b"]);
/// assert_eq!(labels.to_string(), "a,b");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Labels(Vec<String>);

impl Labels {
    /// Build a normalized label set from individual labels.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = Labels::default();
        result.extend(labels);
        result
    }

    /// Add labels, skipping any already present.
    pub fn extend<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in labels {
            for label in item.as_ref().split(',').map(str::trim) {
                if !label.is_empty() && !self.contains(label) {
                    self.0.push(label.to_string());
                }
            }
        }
    }

    /// Returns true if `label` is in the set.
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The labels in insertion order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Deref for Labels {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for Labels {
    fn from(s: &str) -> Self {
        Labels::new([s])
    }
}

impl From<String> for Labels {
    fn from(s: String) -> Self {
        Labels::from(s.as_str())
    }
}

impl From<Vec<String>> for Labels {
    fn from(labels: Vec<String>) -> Self {
        Labels::new(labels)
    }
}

impl From<Vec<&str>> for Labels {
    fn from(labels: Vec<&str>) -> Self {
        Labels::new(labels)
    }
}

impl From<Labels> for Vec<String> {
    fn from(labels: Labels) -> Self {
        labels.0
    }
}

/// The canonical comma-joined form.
impl Display for Labels {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0.join(","))
    }
}
