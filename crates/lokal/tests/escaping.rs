//! Tests for HTML escaping.

use lokal::{Engine, Message, Value, html_escape, html_unescape, params};
use proptest::prelude::*;

#[test]
fn test_escape_script_tag() {
    assert_eq!(
        html_escape(r#"<script type="text/javascript">alert('1')</script>"#),
        "&lt;script type=&quot;text/javascript&quot;&gt;alert(&#x27;1&#x27;)&lt;/script&gt;"
    );
}

#[test]
fn test_escape_ampersand_first() {
    assert_eq!(html_escape("&lt;"), "&amp;lt;");
    assert_eq!(html_unescape("&amp;lt;"), "&lt;");
}

#[test]
fn test_unescape_both_apostrophe_forms() {
    assert_eq!(html_unescape("it&#x27;s &#39;ok&#39;"), "it's 'ok'");
}

#[test]
fn test_values_are_escaped_once() {
    let engine = Engine::default();
    let p = params! { "v" => "<&>" };
    assert_eq!(engine.format("{v}", &p, true).unwrap(), "&lt;&amp;&gt;");
}

#[test]
fn test_safe_value_with_escaped_output() {
    let engine = Engine::default();
    let mut p = params! {};
    p.insert("icon", Value::safe("<i class='x'></i>"));
    assert_eq!(
        engine.format("<b>{icon}</b>", &p, true).unwrap(),
        "&lt;b&gt;<i class='x'></i>&lt;/b&gt;"
    );
}

proptest! {
    #[test]
    fn prop_unescape_reverses_escape(s in "\\PC*") {
        let escaped = html_escape(&s);
        prop_assert_eq!(html_unescape(&escaped), s.as_str());
    }

    #[test]
    fn prop_escaped_render_survives_unescape_cycle(s in "\\PC{1,40}") {
        let engine = Engine::default();
        let message = Message::text(s).to_string();
        let rendered = engine.format(&message, &params! {}, true).unwrap();
        let unescaped = html_unescape(&rendered);
        prop_assert_eq!(html_escape(&unescaped), rendered.as_str());
    }

    #[test]
    fn prop_escaped_text_has_no_markup(s in "\\PC*") {
        let escaped = html_escape(&s);
        prop_assert!(!escaped.contains(['<', '>', '"', '\'']));
    }
}
