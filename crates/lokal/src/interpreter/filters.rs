//! Filter registry for placeholder filters.
//!
//! Filters are applied left to right to a placeholder's text before it is
//! escaped: `{name|trim|capitalize}`.

use std::collections::BTreeMap;

use crate::interpreter::EvalError;

/// Filter function signature.
pub type FilterFn = fn(&str) -> String;

/// Registry for filter functions.
///
/// The default registry contains `upper`, `lower`, `capitalize` and `trim`.
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    filters: BTreeMap<String, FilterFn>,
}

impl FilterRegistry {
    /// Create a registry with no filters.
    pub fn empty() -> Self {
        Self {
            filters: BTreeMap::new(),
        }
    }

    /// Create a registry with the built-in filters.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("upper", upper);
        registry.register("lower", lower);
        registry.register("capitalize", capitalize);
        registry.register("trim", trim);
        registry
    }

    /// Add or replace a filter.
    pub fn register(&mut self, name: impl Into<String>, filter: FilterFn) {
        self.filters.insert(name.into(), filter);
    }

    /// Get a filter by name.
    pub fn get(&self, name: &str) -> Option<FilterFn> {
        self.filters.get(name).copied()
    }

    /// Registered filter names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    /// Apply `filters` in order.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::UnknownFilter`] for the first unregistered name.
    pub fn apply(&self, text: String, filters: &[String]) -> Result<String, EvalError> {
        filters.iter().try_fold(text, |text, name| {
            let filter = self
                .get(name)
                .ok_or_else(|| EvalError::UnknownFilter { name: name.clone() })?;
            Ok(filter(&text))
        })
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn upper(text: &str) -> String {
    text.to_uppercase()
}

fn lower(text: &str) -> String {
    text.to_lowercase()
}

/// Uppercase the first character.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn trim(text: &str) -> String {
    text.trim().to_string()
}
