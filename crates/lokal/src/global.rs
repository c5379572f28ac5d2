//! Process-wide translator for the `global` feature.
//!
//! Optional sugar for applications that want top-level `translate` calls
//! instead of passing a [`Translator`] around. Configure it once at startup
//! with [`with_translator_mut`].

use std::sync::{LazyLock, PoisonError, RwLock};

use crate::Translator;
use crate::types::{Params, ValidationError};

static GLOBAL_TRANSLATOR: LazyLock<RwLock<Translator>> =
    LazyLock::new(|| RwLock::new(Translator::default()));

/// Provides read access to the global translator.
pub fn with_translator<T>(f: impl FnOnce(&Translator) -> T) -> T {
    let guard = GLOBAL_TRANSLATOR
        .read()
        .unwrap_or_else(PoisonError::into_inner);
    f(&guard)
}

/// Provides write access to the global translator.
pub fn with_translator_mut<T>(f: impl FnOnce(&mut Translator) -> T) -> T {
    let mut guard = GLOBAL_TRANSLATOR
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Replace the global translator.
pub fn install(translator: Translator) {
    with_translator_mut(|current| *current = translator);
}

/// Sets the current language of the global translator.
pub fn set_language(language: impl Into<String>) {
    with_translator_mut(|translator| translator.set_current_language(language));
}

/// Returns the current language of the global translator.
pub fn language() -> String {
    with_translator(|translator| translator.current_language().to_owned())
}

/// Translate with the global translator, escaping for HTML.
///
/// # Errors
///
/// Returns an error only if `string` or its metadata is invalid.
pub fn translate(string: &str, params: &Params) -> Result<String, ValidationError> {
    with_translator(|translator| translator.translate(string, params, true))
}
