//! Property tests for the parser and the missing policies.

use lokal::parser::{Message, parse_message};
use lokal::{
    ExtraLengthPolicy, MissingPolicy, PseudoTranslationPolicy, Renderer, SourceString,
    WrappedStringPolicy, params,
};
use proptest::prelude::*;
use proptest::string::string_regex;

proptest! {
    #[test]
    fn prop_quoted_literal_parses_back(s in "\\PC*") {
        let printed = Message::text(s.clone()).to_string();
        let parsed = parse_message(&printed).unwrap();
        prop_assert_eq!(parsed.literal_text(), s);
    }

    #[test]
    fn prop_parse_never_panics(s in "\\PC{0,64}") {
        let _ = parse_message(&s);
    }

    #[test]
    fn prop_printed_message_reparses_equal(s in string_regex(r"[a-z ]{0,8}(\{[a-z]{1,4}\}[a-z #']{0,8}){0,3}").unwrap()) {
        if let Ok(message) = parse_message(&s) {
            let reparsed = parse_message(&message.to_string()).unwrap();
            prop_assert_eq!(reparsed, message);
        }
    }

    #[test]
    fn prop_pseudo_preserves_char_count(s in "[ -~]{0,64}") {
        prop_assert_eq!(
            PseudoTranslationPolicy::pseudo(&s).chars().count(),
            s.chars().count()
        );
    }

    #[test]
    fn prop_policies_render_any_plain_source(s in "[^{}']{1,40}", pct in 0.0f64..2.0) {
        let renderer = Renderer::builder().build();
        let source = SourceString::builder().string(s.clone()).build().unwrap();
        let policies: [Box<dyn MissingPolicy>; 3] = [
            Box::new(PseudoTranslationPolicy),
            Box::new(WrappedStringPolicy::new("{", "}")),
            Box::new(ExtraLengthPolicy::new(pct, "{~}")),
        ];
        for policy in &policies {
            let text = policy.get_text(source.string(), "fr");
            let rendered = renderer.format(&text, &params! {}, false);
            prop_assert!(rendered.is_ok(), "{text:?} failed to render");
        }
    }

    #[test]
    fn prop_extra_length_adds_rounded_up_share(s in "[a-z]{1,40}", pct in 0.0f64..1.0) {
        let renderer = Renderer::builder().build();
        let text = ExtraLengthPolicy::new(pct, "~").get_text(&s, "de");
        let rendered = renderer.format(&text, &params! {}, false).unwrap();
        let expected = (s.len() as f64 * pct).ceil() as usize;
        prop_assert_eq!(rendered.len(), s.len() + expected);
    }
}
