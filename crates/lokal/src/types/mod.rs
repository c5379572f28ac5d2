mod labels;
mod params;
mod source_string;
mod value;

pub use labels::Labels;
pub use params::{Metadata, Params, RESERVED_KEYS, is_reserved};
pub use source_string::{
    PayloadMeta, PushMeta, PushPayload, SourcePayload, SourceString, SourceStringSet,
    ValidationError, identity_key,
};
pub use value::Value;
