//! Translation lookup and the translation context object.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use bon::Builder;

use crate::render::Renderer;
use crate::types::{Params, SourceString, ValidationError};

/// A store of translations by key and language.
pub trait TranslationSource: Send + Sync {
    /// The translation of `key` in `language`, if one exists.
    ///
    /// `key` is a source string's identity: its key alone, or
    /// `key:ctx1:ctx2` when it has context.
    fn get(&self, key: &str, language: &str) -> Option<String>;
}

/// In-memory [`TranslationSource`].
///
/// Each language's translations are replaced as a whole by
/// [`update`](Self::update), which is how a fetched batch is installed.
#[derive(Debug, Default)]
pub struct MemoryCache {
    languages: RwLock<BTreeMap<String, BTreeMap<String, String>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every translation for `language`.
    pub fn update<I, K, V>(&self, language: impl Into<String>, translations: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let translations = translations
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.languages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(language.into(), translations);
    }

    /// Add or replace a single translation.
    pub fn insert(
        &self,
        language: impl Into<String>,
        key: impl Into<String>,
        translation: impl Into<String>,
    ) {
        self.languages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(language.into())
            .or_default()
            .insert(key.into(), translation.into());
    }

    /// Languages with at least one batch installed.
    pub fn languages(&self) -> Vec<String> {
        self.languages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

impl TranslationSource for MemoryCache {
    fn get(&self, key: &str, language: &str) -> Option<String> {
        self.languages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(language)?
            .get(key)
            .cloned()
    }
}

/// The translation context: languages, a translation store and a renderer.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lokal::{MemoryCache, Translator, params};
///
/// let cache = Arc::new(MemoryCache::new());
/// cache.update("el", [("Table", "Τραπέζι")]);
///
/// let translator = Translator::builder()
///     .current_language("el")
///     .translations(cache)
///     .build();
///
/// assert_eq!(translator.translate("Table", &params! {}, true).unwrap(), "Τραπέζι");
/// assert_eq!(translator.translate("Chair", &params! {}, true).unwrap(), "Chair");
/// ```
#[derive(Builder)]
#[builder(on(String, into))]
pub struct Translator {
    /// Language source strings are written in.
    #[builder(default = "en".to_string())]
    source_language: String,

    /// Language used when a call names none.
    #[builder(default = "en".to_string())]
    current_language: String,

    #[builder(default)]
    renderer: Renderer,

    #[builder(default = empty_store())]
    translations: Arc<dyn TranslationSource>,
}

fn empty_store() -> Arc<dyn TranslationSource> {
    Arc::new(MemoryCache::new())
}

impl Default for Translator {
    fn default() -> Self {
        Translator::builder().build()
    }
}

impl Translator {
    // =========================================================================
    // Language Management
    // =========================================================================

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn current_language(&self) -> &str {
        &self.current_language
    }

    pub fn set_current_language(&mut self, language: impl Into<String>) {
        self.current_language = language.into();
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    // =========================================================================
    // Translation
    // =========================================================================

    /// Translate `string` into the current language.
    ///
    /// Reserved parameters supply the source string's metadata.
    ///
    /// # Errors
    ///
    /// Returns an error only if `string` or its metadata is invalid.
    pub fn translate(
        &self,
        string: &str,
        params: &Params,
        escape: bool,
    ) -> Result<String, ValidationError> {
        let source = SourceString::from_metadata(string, None, params.metadata())?;
        Ok(self.translate_source(&source, None, params, escape))
    }

    /// Translate `source` into `language`, or the current language.
    pub fn translate_source(
        &self,
        source: &SourceString,
        language: Option<&str>,
        params: &Params,
        escape: bool,
    ) -> String {
        let language = language.unwrap_or(&self.current_language);
        let translation = self.translation_for(source, language);
        self.renderer
            .render(source, translation.as_deref(), language, params, escape)
    }

    /// The message text to render for `source` in `language`, if any.
    ///
    /// In the source language this is the source string itself. Otherwise
    /// the store is asked for the string's [identity](SourceString::identity),
    /// so a string with context only finds translations stored under
    /// `key:context`.
    pub fn translation_for(&self, source: &SourceString, language: &str) -> Option<String> {
        if language == self.source_language {
            return Some(source.string().to_string());
        }
        let translation = self
            .translations
            .get(&source.identity(), language)
            .filter(|t| !t.is_empty())?;
        Some(self.fill_plural_argument(source, translation))
    }

    /// Name the argument of a translation written as `{???, plural, ...}`
    /// after the source string's plural argument.
    fn fill_plural_argument(&self, source: &SourceString, translation: String) -> String {
        let Some(rest) = translation.strip_prefix("{???") else {
            return translation;
        };
        let Ok(message) = self.renderer.engine().cache().get_or_compile(source.string()) else {
            return translation;
        };
        match message.plural_argument() {
            Some(argument) => format!("{{{argument}{rest}"),
            None => translation,
        }
    }
}
