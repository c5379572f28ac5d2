//! HTML escaping for rendered text and substituted values.

use std::borrow::Cow;

use html_escape::{decode_html_entities, encode_quoted_attribute};

/// Escape `&`, `<`, `>`, `"` and `'` as HTML entities.
///
/// Returns the input unchanged, without allocating, when nothing needs
/// escaping.
///
/// ```
/// use lokal::html_escape;
///
/// assert_eq!(
///     html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
/// );
/// ```
pub fn html_escape(text: &str) -> Cow<'_, str> {
    encode_quoted_attribute(text)
}

/// Reverse [`html_escape`].
///
/// Named and numeric character references are decoded, so both `&#x27;`
/// and `&#39;` give back an apostrophe. Text that is not a known reference
/// is left as it is.
pub fn html_unescape(text: &str) -> Cow<'_, str> {
    decode_html_entities(text)
}
