//! Policies deciding what to render when a translation is missing or
//! fails to render.

mod config;
mod error;
mod missing;

pub use config::{
    ConfigError, ErrorFactory, MissingFactory, OptionValue, PolicyRegistry, PolicySpec,
    RendererConfig,
};
pub use error::{ErrorPolicy, RenderFailure, SourceStringErrorPolicy};
pub use missing::{
    ChainedPolicy, ExtraLengthPolicy, MissingPolicy, PseudoTranslationPolicy, SourceStringPolicy,
    WrappedStringPolicy,
};
