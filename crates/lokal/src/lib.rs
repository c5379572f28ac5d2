pub mod interpreter;
pub mod parser;
pub mod policy;
pub mod types;

mod escape;
#[cfg(feature = "global")]
pub mod global;
mod render;
mod suggest;
mod translator;

pub use escape::{html_escape, html_unescape};
pub use interpreter::{
    EvalContext, EvalError, FilterRegistry, MessageCache, RenderError, TranslationWarning,
    lint_translation,
};
pub use parser::{Message, ParseError, parse_message};
pub use policy::{
    ChainedPolicy, ConfigError, ErrorPolicy, ExtraLengthPolicy, MissingPolicy, OptionValue,
    PolicyRegistry, PolicySpec, PseudoTranslationPolicy, RenderFailure, RendererConfig,
    SourceStringErrorPolicy, SourceStringPolicy, WrappedStringPolicy,
};
pub use render::{Engine, Renderer};
pub use suggest::compute_suggestions;
pub use translator::{MemoryCache, TranslationSource, Translator};
pub use types::{
    Labels, Metadata, Params, PushPayload, SourcePayload, SourceString, SourceStringSet,
    ValidationError, Value, identity_key,
};

/// Creates a [`Params`] from name-value pairs.
///
/// Values are automatically converted via `Into<Value>`, so you can pass
/// integers, floats or strings directly. Reserved names such as `_context`
/// are stored as metadata.
///
/// # Example
///
/// ```
/// use lokal::{params, Value};
///
/// let p = params! { "count" => 3, "name" => "Alice" };
/// assert_eq!(p.len(), 2);
/// assert_eq!(p.get("count"), Some(&Value::Number(3)));
/// assert_eq!(p.get("name").and_then(Value::as_string), Some("Alice"));
/// ```
#[macro_export]
macro_rules! params {
    {} => {
        $crate::Params::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut params = $crate::Params::new();
            $(
                params.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            params
        }
    };
}
