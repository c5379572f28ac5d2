//! Error policies: the fallback text used when a render fails.

use tracing::error;

use crate::interpreter::RenderError;
use crate::render::Engine;
use crate::types::{Params, SourceString};

/// Everything known about a failed render.
pub struct RenderFailure<'a> {
    pub(crate) source: &'a SourceString,
    pub(crate) translation: Option<&'a str>,
    pub(crate) language: &'a str,
    pub(crate) params: &'a Params,
    pub(crate) escape: bool,
    pub(crate) error: &'a RenderError,
    pub(crate) engine: &'a Engine,
}

impl RenderFailure<'_> {
    pub fn source(&self) -> &SourceString {
        self.source
    }

    /// The translation that failed, or `None` if the missing policy's
    /// output failed.
    pub fn translation(&self) -> Option<&str> {
        self.translation
    }

    pub fn language(&self) -> &str {
        self.language
    }

    pub fn params(&self) -> &Params {
        self.params
    }

    pub fn escape(&self) -> bool {
        self.escape
    }

    pub fn error(&self) -> &RenderError {
        self.error
    }

    /// Render the source string with the same parameters and escaping.
    ///
    /// # Errors
    ///
    /// Returns the error if the source string cannot be rendered either.
    pub fn render_source(&self) -> Result<String, RenderError> {
        self.engine
            .format(self.source.string(), self.params, self.escape)
    }
}

/// Produces the final text when rendering a message fails.
///
/// This is the last step of a render, so implementations return text in
/// every case.
pub trait ErrorPolicy: Send + Sync {
    fn get_text(&self, failure: &RenderFailure<'_>) -> String;
}

impl<F> ErrorPolicy for F
where
    F: Fn(&RenderFailure<'_>) -> String + Send + Sync,
{
    fn get_text(&self, failure: &RenderFailure<'_>) -> String {
        self(failure)
    }
}

/// Renders the source string instead of the failed translation, and falls
/// back to a fixed text if that fails too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStringErrorPolicy {
    default_text: String,
}

impl SourceStringErrorPolicy {
    pub fn new(default_text: impl Into<String>) -> Self {
        Self {
            default_text: default_text.into(),
        }
    }

    pub fn default_text(&self) -> &str {
        &self.default_text
    }
}

impl Default for SourceStringErrorPolicy {
    fn default() -> Self {
        Self::new("ERROR")
    }
}

impl ErrorPolicy for SourceStringErrorPolicy {
    fn get_text(&self, failure: &RenderFailure<'_>) -> String {
        match failure.render_source() {
            Ok(text) => text,
            Err(e) => {
                error!(
                    source_string = failure.source.string(),
                    language = failure.language,
                    error = %e,
                    "source string failed to render, using default text"
                );
                self.default_text.clone()
            }
        }
    }
}
