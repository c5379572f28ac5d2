//! Policy configuration.
//!
//! A renderer is described by a small JSON document naming its policies:
//!
//! ```json
//! {
//!   "missing_policy": [
//!     { "name": "pseudo" },
//!     { "name": "wrapped", "options": { "start": "[[", "end": "]]" } }
//!   ],
//!   "error_policy": { "name": "source_string_error", "options": { "default_text": "?" } },
//!   "escape_params": true
//! }
//! ```
//!
//! Names are resolved through a [`PolicyRegistry`] when the configuration is
//! loaded, so a bad name or option is reported before anything renders.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::policy::{
    ChainedPolicy, ErrorPolicy, ExtraLengthPolicy, MissingPolicy, PseudoTranslationPolicy,
    SourceStringErrorPolicy, SourceStringPolicy, WrappedStringPolicy,
};
use crate::render::Renderer;
use crate::suggest::{compute_suggestions, did_you_mean};

/// An error loading or resolving a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration is not valid JSON or has the wrong shape.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// No policy is registered under the name.
    #[error("unknown policy '{name}'{}", did_you_mean(suggestions))]
    UnknownPolicy {
        name: String,
        suggestions: Vec<String>,
    },

    /// An option is unknown or has the wrong type.
    #[error("invalid option '{option}' for policy '{policy}': {message}")]
    InvalidOption {
        policy: String,
        option: String,
        message: String,
    },
}

/// A policy option value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl OptionValue {
    fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Bool(_) => "boolean",
            OptionValue::Integer(_) => "integer",
            OptionValue::Float(_) => "number",
            OptionValue::Text(_) => "string",
        }
    }
}

/// A named policy with its options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicySpec {
    pub name: String,
    #[serde(default)]
    pub options: BTreeMap<String, OptionValue>,
}

impl PolicySpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: BTreeMap::new(),
        }
    }

    /// Add an option.
    pub fn with(mut self, option: impl Into<String>, value: OptionValue) -> Self {
        self.options.insert(option.into(), value);
        self
    }

    /// Reject any option not in `allowed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] for the first unknown option.
    pub fn expect_options(&self, allowed: &[&str]) -> Result<(), ConfigError> {
        match self.options.keys().find(|k| !allowed.contains(&k.as_str())) {
            Some(option) => Err(self.invalid(option, "unknown option".to_string())),
            None => Ok(()),
        }
    }

    /// A string option.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the option is not a string.
    pub fn text(&self, option: &str) -> Result<Option<&str>, ConfigError> {
        match self.options.get(option) {
            None => Ok(None),
            Some(OptionValue::Text(s)) => Ok(Some(s)),
            Some(other) => Err(self.wrong_type(option, "string", other)),
        }
    }

    /// A numeric option. Integers are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if the option is not a number.
    pub fn float(&self, option: &str) -> Result<Option<f64>, ConfigError> {
        match self.options.get(option) {
            None => Ok(None),
            Some(OptionValue::Float(f)) => Ok(Some(*f)),
            Some(OptionValue::Integer(n)) => Ok(Some(*n as f64)),
            Some(other) => Err(self.wrong_type(option, "number", other)),
        }
    }

    fn wrong_type(&self, option: &str, expected: &str, found: &OptionValue) -> ConfigError {
        self.invalid(
            option,
            format!("expected {expected}, got {}", found.type_name()),
        )
    }

    fn invalid(&self, option: &str, message: String) -> ConfigError {
        ConfigError::InvalidOption {
            policy: self.name.clone(),
            option: option.to_string(),
            message,
        }
    }
}

/// Builds a missing policy from its spec.
pub type MissingFactory =
    Box<dyn Fn(&PolicySpec) -> Result<Arc<dyn MissingPolicy>, ConfigError> + Send + Sync>;

/// Builds an error policy from its spec.
pub type ErrorFactory =
    Box<dyn Fn(&PolicySpec) -> Result<Arc<dyn ErrorPolicy>, ConfigError> + Send + Sync>;

/// Maps policy names to factories.
///
/// The default registry knows the built-in policies. Applications add their
/// own with [`register_missing`](Self::register_missing) and
/// [`register_error`](Self::register_error).
pub struct PolicyRegistry {
    missing: BTreeMap<String, MissingFactory>,
    error: BTreeMap<String, ErrorFactory>,
}

impl PolicyRegistry {
    /// Create a registry with no policies.
    pub fn empty() -> Self {
        Self {
            missing: BTreeMap::new(),
            error: BTreeMap::new(),
        }
    }

    /// Create a registry with the built-in policies.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_missing("source_string", source_string);
        registry.register_missing("pseudo", pseudo);
        registry.register_missing("wrapped", wrapped);
        registry.register_missing("extra_length", extra_length);
        registry.register_error("source_string_error", source_string_error);
        registry
    }

    /// Register a missing policy factory, replacing any with the same name.
    pub fn register_missing<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&PolicySpec) -> Result<Arc<dyn MissingPolicy>, ConfigError> + Send + Sync + 'static,
    {
        self.missing.insert(name.into(), Box::new(factory));
    }

    /// Register an error policy factory, replacing any with the same name.
    pub fn register_error<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&PolicySpec) -> Result<Arc<dyn ErrorPolicy>, ConfigError> + Send + Sync + 'static,
    {
        self.error.insert(name.into(), Box::new(factory));
    }

    /// Build a missing policy. Several specs build a chain.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown name or a bad option.
    pub fn missing_policy(
        &self,
        specs: &[PolicySpec],
    ) -> Result<Arc<dyn MissingPolicy>, ConfigError> {
        let mut policies = specs
            .iter()
            .map(|spec| {
                let factory = self
                    .missing
                    .get(&spec.name)
                    .ok_or_else(|| unknown(&spec.name, self.missing.keys()))?;
                factory(spec)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match policies.len() {
            0 => Arc::new(SourceStringPolicy),
            1 => policies.remove(0),
            _ => Arc::new(ChainedPolicy::new(policies)),
        })
    }

    /// Build an error policy.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown name or a bad option.
    pub fn error_policy(&self, spec: &PolicySpec) -> Result<Arc<dyn ErrorPolicy>, ConfigError> {
        let factory = self
            .error
            .get(&spec.name)
            .ok_or_else(|| unknown(&spec.name, self.error.keys()))?;
        factory(spec)
    }
}

// ============================================================================
// Built-in factories
// ============================================================================

fn source_string(spec: &PolicySpec) -> Result<Arc<dyn MissingPolicy>, ConfigError> {
    spec.expect_options(&[])?;
    Ok(Arc::new(SourceStringPolicy))
}

fn pseudo(spec: &PolicySpec) -> Result<Arc<dyn MissingPolicy>, ConfigError> {
    spec.expect_options(&[])?;
    Ok(Arc::new(PseudoTranslationPolicy))
}

fn wrapped(spec: &PolicySpec) -> Result<Arc<dyn MissingPolicy>, ConfigError> {
    spec.expect_options(&["start", "end"])?;
    Ok(Arc::new(WrappedStringPolicy::new(
        spec.text("start")?.unwrap_or("["),
        spec.text("end")?.unwrap_or("]"),
    )))
}

fn extra_length(spec: &PolicySpec) -> Result<Arc<dyn MissingPolicy>, ConfigError> {
    spec.expect_options(&["extra_percentage", "extra_str"])?;
    let percentage = spec.float("extra_percentage")?.unwrap_or(0.3);
    if !(0.0..=ExtraLengthPolicy::MAX_PERCENTAGE).contains(&percentage) {
        return Err(spec.invalid(
            "extra_percentage",
            format!(
                "must be a number from 0 to {}",
                ExtraLengthPolicy::MAX_PERCENTAGE
            ),
        ));
    }
    let extra = spec.text("extra_str")?.unwrap_or("~extra~");
    Ok(Arc::new(ExtraLengthPolicy::new(percentage, extra)))
}

fn source_string_error(spec: &PolicySpec) -> Result<Arc<dyn ErrorPolicy>, ConfigError> {
    spec.expect_options(&["default_text"])?;
    Ok(Arc::new(match spec.text("default_text")? {
        Some(text) => SourceStringErrorPolicy::new(text),
        None => SourceStringErrorPolicy::default(),
    }))
}

fn unknown<'a>(name: &str, known: impl Iterator<Item = &'a String>) -> ConfigError {
    let known: Vec<String> = known.cloned().collect();
    ConfigError::UnknownPolicy {
        name: name.to_string(),
        suggestions: compute_suggestions(name, &known),
    }
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for PolicyRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PolicyRegistry")
            .field("missing", &self.missing.keys().collect::<Vec<_>>())
            .field("error", &self.error.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Renderer settings as read from a configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    /// Missing policies, applied in order. Empty means the source string.
    pub missing_policy: Vec<PolicySpec>,
    /// The error policy. `None` means `source_string_error`.
    pub error_policy: Option<PolicySpec>,
    /// Escape substituted parameter values.
    pub escape_params: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            missing_policy: Vec::new(),
            error_policy: None,
            escape_params: true,
        }
    }
}

impl RendererConfig {
    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the text is not a valid configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Resolve the configured policies with the built-in registry.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown policy or a bad option.
    pub fn build(&self) -> Result<Renderer, ConfigError> {
        self.build_with(&PolicyRegistry::new())
    }

    /// Resolve the configured policies with a custom registry.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown policy or a bad option.
    pub fn build_with(&self, registry: &PolicyRegistry) -> Result<Renderer, ConfigError> {
        let missing_policy = registry.missing_policy(&self.missing_policy)?;
        let error_policy = self
            .error_policy
            .as_ref()
            .map(|spec| registry.error_policy(spec))
            .transpose()?;
        Ok(Renderer::builder()
            .missing_policy(missing_policy)
            .maybe_error_policy(error_policy)
            .escape_params(self.escape_params)
            .build())
    }
}
