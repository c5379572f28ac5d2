//! Tests for the renderer: translation selection, policies and caching.

use std::sync::Arc;
use std::thread;

use lokal::{
    FilterRegistry, PseudoTranslationPolicy, Renderer, SourceString, WrappedStringPolicy,
    params,
};
use tracing_subscriber::fmt;

fn init_tracing() {
    let _ = fmt().with_test_writer().try_init();
}

fn source(string: &str) -> SourceString {
    SourceString::builder().string(string).build().unwrap()
}

const FILES: &str = "{n, plural, one {# file} other {# files}}";

// =============================================================================
// Translation selection
// =============================================================================

#[test]
fn test_renders_translation() {
    init_tracing();
    let renderer = Renderer::default();
    let source = source(FILES);
    let translation = "{n, plural, one {# fichier} other {# fichiers}}";
    assert_eq!(
        renderer.render(&source, Some(translation), "fr", &params! { "n" => 1 }, true),
        "1 fichier"
    );
    assert_eq!(
        renderer.render(&source, Some(translation), "fr", &params! { "n" => 4 }, true),
        "4 fichiers"
    );
}

#[test]
fn test_missing_translation_uses_source() {
    init_tracing();
    let renderer = Renderer::default();
    let source = source(FILES);
    assert_eq!(
        renderer.render(&source, None, "fr", &params! { "n" => 2 }, true),
        "2 files"
    );
}

#[test]
fn test_empty_translation_counts_as_missing() {
    init_tracing();
    let renderer = Renderer::builder()
        .missing_policy(Arc::new(WrappedStringPolicy::default()))
        .build();
    let source = source("Close");
    assert_eq!(
        renderer.render(&source, Some(""), "de", &params! {}, true),
        "[Close]"
    );
}

#[test]
fn test_missing_policy_receives_language() {
    let renderer = Renderer::builder()
        .missing_policy(Arc::new(|source: &str, language: &str| {
            format!("{source} ({language})")
        }))
        .build();
    let source = source("Close");
    assert_eq!(
        renderer.render(&source, None, "de", &params! {}, true),
        "Close (de)"
    );
}

#[test]
fn test_escape_flag_covers_literal_text() {
    let renderer = Renderer::default();
    let source = source("<b>{name}</b>");
    let p = params! { "name" => "Ann & Bo" };
    assert_eq!(
        renderer.render(&source, None, "en", &p, false),
        "<b>Ann &amp; Bo</b>"
    );
    assert_eq!(
        renderer.render(&source, None, "en", &p, true),
        "&lt;b&gt;Ann &amp; Bo&lt;/b&gt;"
    );
}

#[test]
fn test_parameter_escaping_disabled() {
    let renderer = Renderer::builder().escape_params(false).build();
    let source = source("{html}");
    assert_eq!(
        renderer.render(&source, None, "en", &params! { "html" => "<hr>" }, false),
        "<hr>"
    );
}

#[test]
fn test_custom_filters() {
    fn shout(text: &str) -> String {
        format!("{}!", text.to_uppercase())
    }

    let mut filters = FilterRegistry::new();
    filters.register("shout", shout);
    let renderer = Renderer::builder().filters(filters).build();
    assert_eq!(
        renderer
            .format("{word|shout}", &params! { "word" => "hey" }, false)
            .unwrap(),
        "HEY!"
    );
}

// =============================================================================
// Cache
// =============================================================================

#[test]
fn test_messages_are_compiled_once() {
    let renderer = Renderer::default();
    let cache = renderer.engine().cache();
    assert!(cache.is_empty());

    let source = source("Hi {name}");
    for name in ["a", "b", "c"] {
        renderer.render(&source, None, "en", &params! { "name" => name }, true);
    }
    assert_eq!(cache.len(), 1);

    let first = cache.get_or_compile("Hi {name}").unwrap();
    let second = cache.get_or_compile("Hi {name}").unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_parse_failures_are_not_cached() {
    let renderer = Renderer::default();
    let cache = renderer.engine().cache();
    assert!(cache.get_or_compile("{oops").is_err());
    assert!(cache.is_empty());
}

#[test]
fn test_concurrent_renders() {
    init_tracing();
    let renderer = Arc::new(
        Renderer::builder()
            .missing_policy(Arc::new(PseudoTranslationPolicy))
            .build(),
    );
    let source = Arc::new(source(FILES));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let renderer = Arc::clone(&renderer);
            let source = Arc::clone(&source);
            thread::spawn(move || {
                (0..50)
                    .map(|n| {
                        let count = i * 50 + n;
                        let text = renderer.render(
                            &source,
                            None,
                            "fr",
                            &params! { "n" => count },
                            true,
                        );
                        (count, text)
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for (count, text) in handle.join().unwrap() {
            let expected = if count == 1 {
                "1 ƒıĺê".to_string()
            } else {
                format!("{count} ƒıĺêš")
            };
            assert_eq!(text, expected);
        }
    }
    assert_eq!(renderer.engine().cache().len(), 1);
}
