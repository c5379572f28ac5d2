//! Rendering: turning a source string and its translation into output text.

use std::borrow::Cow;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use bon::bon;
use tracing::{debug, warn};

use crate::interpreter::{EvalContext, FilterRegistry, MessageCache, RenderError, eval_message};
use crate::policy::{
    ErrorPolicy, MissingPolicy, RenderFailure, SourceStringErrorPolicy, SourceStringPolicy,
};
use crate::types::{Params, SourceString};

/// Formats message text: parse through the cache, then evaluate.
pub struct Engine {
    cache: MessageCache,
    filters: FilterRegistry,
    escape_params: bool,
}

impl Engine {
    pub fn new(filters: FilterRegistry, escape_params: bool) -> Self {
        Self {
            cache: MessageCache::new(),
            filters,
            escape_params,
        }
    }

    /// Format `text` with `params`. `escape` controls escaping of the
    /// message's literal text. Substituted values are escaped unless
    /// parameter escaping is off or the value is marked safe.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` does not parse or does not evaluate.
    pub fn format(&self, text: &str, params: &Params, escape: bool) -> Result<String, RenderError> {
        let message = self.cache.get_or_compile(text)?;
        let mut ctx = EvalContext::with_escaping(params, escape, self.escape_params);
        Ok(eval_message(&message, &mut ctx, &self.filters)?)
    }

    pub fn cache(&self) -> &MessageCache {
        &self.cache
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    pub fn escape_params(&self) -> bool {
        self.escape_params
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(FilterRegistry::new(), true)
    }
}

impl Debug for Engine {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Engine")
            .field("cache", &self.cache)
            .field("escape_params", &self.escape_params)
            .finish_non_exhaustive()
    }
}

/// Renders source strings and translations, recovering from every failure
/// through its policies.
///
/// ```
/// use lokal::{Renderer, SourceString, params};
///
/// let renderer = Renderer::builder().build();
/// let source = SourceString::builder()
///     .string("{n, plural, one {# item} other {# items}}")
///     .build()
///     .unwrap();
///
/// assert_eq!(renderer.render(&source, None, "fr", &params! { "n" => 5 }, true), "5 items");
/// assert_eq!(
///     renderer.render(&source, Some("{n, plural, one {# objet} other {# objets}}"), "fr", &params! { "n" => 1 }, true),
///     "1 objet"
/// );
/// ```
pub struct Renderer {
    engine: Engine,
    missing_policy: Arc<dyn MissingPolicy>,
    error_policy: Arc<dyn ErrorPolicy>,
}

#[bon]
impl Renderer {
    /// Missing and error policies default to the source string policies,
    /// filters to the built-in set, and parameter escaping to on.
    #[builder]
    pub fn new(
        missing_policy: Option<Arc<dyn MissingPolicy>>,
        error_policy: Option<Arc<dyn ErrorPolicy>>,
        filters: Option<FilterRegistry>,
        #[builder(default = true)] escape_params: bool,
    ) -> Self {
        Self {
            engine: Engine::new(filters.unwrap_or_default(), escape_params),
            missing_policy: missing_policy.unwrap_or_else(|| Arc::new(SourceStringPolicy)),
            error_policy: error_policy
                .unwrap_or_else(|| Arc::new(SourceStringErrorPolicy::default())),
        }
    }
}

impl Renderer {
    /// Render `source` in `language`.
    ///
    /// A missing or empty `translation` is replaced by the missing policy's
    /// text. If parsing or evaluating the chosen text fails, the error
    /// policy's text is returned instead. This never fails.
    pub fn render(
        &self,
        source: &SourceString,
        translation: Option<&str>,
        language: &str,
        params: &Params,
        escape: bool,
    ) -> String {
        let translation = translation.filter(|t| !t.is_empty());
        let text = match translation {
            Some(text) => Cow::Borrowed(text),
            None => {
                debug!(
                    key = source.key(),
                    language, "translation missing, applying missing policy"
                );
                Cow::Owned(self.missing_policy.get_text(source.string(), language))
            }
        };

        match self.engine.format(&text, params, escape) {
            Ok(output) => output,
            Err(error) => {
                warn!(
                    key = source.key(),
                    language,
                    error = %error,
                    "render failed, applying error policy"
                );
                self.error_policy.get_text(&RenderFailure {
                    source,
                    translation,
                    language,
                    params,
                    escape,
                    error: &error,
                    engine: &self.engine,
                })
            }
        }
    }

    /// Format arbitrary message text without any policy.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` does not parse or does not evaluate.
    pub fn format(&self, text: &str, params: &Params, escape: bool) -> Result<String, RenderError> {
        self.engine.format(text, params, escape)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::builder().build()
    }
}

impl Debug for Renderer {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Renderer")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}
