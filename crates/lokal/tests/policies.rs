//! Tests for the missing and error policies.

use std::sync::Arc;

use lokal::{
    ChainedPolicy, ErrorPolicy, ExtraLengthPolicy, MissingPolicy, PseudoTranslationPolicy,
    RenderError, RenderFailure, Renderer, SourceString, SourceStringErrorPolicy,
    SourceStringPolicy, WrappedStringPolicy, params,
};

fn source(string: &str) -> SourceString {
    SourceString::builder().string(string).build().unwrap()
}

// =============================================================================
// Missing policies
// =============================================================================

#[test]
fn test_source_string() {
    assert_eq!(SourceStringPolicy.get_text("Source", "fr"), "Source");
}

#[test]
fn test_pseudo_translation() {
    assert_eq!(PseudoTranslationPolicy.get_text("Source", "fr"), "Șøüȓċê");
    assert_eq!(
        PseudoTranslationPolicy.get_text("This is a long sentence", "fr"),
        "Ťȟıš ıš à ĺøñğ šêñťêñċê"
    );
}

#[test]
fn test_pseudo_translation_keeps_length() {
    let text = "The Quick Brown Fox Jumps Over The Lazy Dog";
    let pseudo = PseudoTranslationPolicy::pseudo(text);
    assert_eq!(pseudo.chars().count(), text.chars().count());
    assert!(!pseudo.chars().any(|c| c.is_ascii_alphabetic()));
}

#[test]
fn test_pseudo_translation_leaves_placeholders() {
    assert_eq!(
        PseudoTranslationPolicy.get_text("Hello {name|upper}!", "fr"),
        "Ȟêĺĺø {name|upper}!"
    );
}

#[test]
fn test_pseudo_translation_of_invalid_message() {
    assert_eq!(PseudoTranslationPolicy.get_text("ab {", "fr"), "àƀ {");
}

#[test]
fn test_wrapped_string() {
    assert_eq!(
        WrappedStringPolicy::new("[[", "]]").get_text("Source", "fr"),
        "[[Source]]"
    );
    assert_eq!(
        WrappedStringPolicy::default().get_text("Source", "fr"),
        "[Source]"
    );
}

#[test]
fn test_extra_length() {
    assert_eq!(
        ExtraLengthPolicy::default().get_text("Source", "de"),
        "Source~e"
    );
    assert_eq!(
        ExtraLengthPolicy::new(0.8, "$").get_text("Source", "de"),
        "Source$$$$$"
    );
}

#[test]
fn test_chained() {
    let renderer_free = ChainedPolicy::default()
        .then(PseudoTranslationPolicy)
        .then(ExtraLengthPolicy::new(0.5, "~extra~"))
        .then(WrappedStringPolicy::new(">>", "<<"));
    assert_eq!(renderer_free.len(), 3);
    assert_eq!(
        renderer_free.get_text("This is a long sentence", "fr"),
        ">>Ťȟıš ıš à ĺøñğ šêñťêñċê~extra~~extr<<"
    );

    let reordered = ChainedPolicy::default()
        .then(ExtraLengthPolicy::new(0.5, "~extra~"))
        .then(WrappedStringPolicy::new(">>", "<<"))
        .then(PseudoTranslationPolicy);
    assert_eq!(
        reordered.get_text("This is a long sentence", "fr"),
        ">>Ťȟıš ıš à ĺøñğ šêñťêñċê~êẋťȓà~~êẋťȓ<<"
    );
}

#[test]
fn test_chained_from_vec() {
    let policies: Vec<Arc<dyn MissingPolicy>> = vec![
        Arc::new(PseudoTranslationPolicy),
        Arc::new(WrappedStringPolicy::default()),
    ];
    let chain = ChainedPolicy::new(policies);
    assert_eq!(chain.get_text("Hi", "fr"), "[Ȟı]");
}

#[test]
fn test_empty_chain_is_identity() {
    let chain = ChainedPolicy::default();
    assert!(chain.is_empty());
    assert_eq!(chain.get_text("Hi {x}", "fr"), "Hi {x}");
}

#[test]
fn test_closure_is_a_missing_policy() {
    let policy = |source: &str, language: &str| format!("{source} ({language})");
    let chain = ChainedPolicy::default()
        .then(policy)
        .then(WrappedStringPolicy::default());
    assert_eq!(chain.get_text("Hi", "el"), "[Hi (el)]");
}

// =============================================================================
// Policies applied while rendering
// =============================================================================

#[test]
fn test_missing_policy_output_is_rendered() {
    let renderer = Renderer::builder()
        .missing_policy(Arc::new(
            ChainedPolicy::default()
                .then(PseudoTranslationPolicy)
                .then(WrappedStringPolicy::new("{", "}")),
        ))
        .build();
    let source = source("{n, plural, one {# file} other {# files}}");
    assert_eq!(
        renderer.render(&source, None, "fr", &params! { "n" => 2 }, false),
        "{2 ƒıĺêš}"
    );
}

#[test]
fn test_huge_extra_length_still_renders() {
    let renderer = Renderer::builder()
        .missing_policy(Arc::new(ExtraLengthPolicy::new(1e19, "~")))
        .build();
    let source = source("Hi");
    assert_eq!(renderer.render(&source, None, "fr", &params! {}, false), "Hi~~~~~~~~~~~~~~~~~~~~");
}

#[test]
fn test_missing_policy_output_is_escaped() {
    let renderer = Renderer::builder()
        .missing_policy(Arc::new(WrappedStringPolicy::new("<", ">")))
        .build();
    let source = source("Hi");
    assert_eq!(renderer.render(&source, None, "fr", &params! {}, true), "&lt;Hi&gt;");
    assert_eq!(renderer.render(&source, None, "fr", &params! {}, false), "<Hi>");
}

#[test]
fn test_error_policy_renders_source() {
    let renderer = Renderer::default();
    let source = source("Hello {name}");
    let p = params! { "name" => "Bob" };
    assert_eq!(
        renderer.render(&source, Some("Bonjour {nom}"), "fr", &p, true),
        "Hello Bob"
    );
    assert_eq!(
        renderer.render(&source, Some("Bonjour {name"), "fr", &p, true),
        "Hello Bob"
    );
}

#[test]
fn test_error_policy_default_text() {
    let renderer = Renderer::default();
    let broken = source("{");
    assert_eq!(renderer.render(&broken, None, "fr", &params! {}, true), "ERROR");
    assert_eq!(
        renderer.render(&broken, Some("{"), "fr", &params! {}, true),
        "ERROR"
    );
}

#[test]
fn test_error_policy_custom_default_text() {
    let renderer = Renderer::builder()
        .error_policy(Arc::new(SourceStringErrorPolicy::new("???")))
        .build();
    let missing_param = source("{x}");
    assert_eq!(
        renderer.render(&missing_param, Some("{x} !"), "fr", &params! {}, true),
        "???"
    );
    assert_eq!(SourceStringErrorPolicy::default().default_text(), "ERROR");
}

fn describe_failure(failure: &RenderFailure<'_>) -> String {
    let kind = match failure.error() {
        RenderError::Parse(_) => "parse",
        RenderError::Eval(_) => "eval",
    };
    format!(
        "{kind} error in {} for '{}'",
        failure.language(),
        failure.translation().unwrap_or("<missing>")
    )
}

#[test]
fn test_custom_error_policy_sees_failure() {
    let renderer = Renderer::builder()
        .error_policy(Arc::new(describe_failure))
        .build();
    let source = source("Hi {name}");
    assert_eq!(
        renderer.render(&source, Some("Salut {name"), "fr", &params! {}, true),
        "parse error in fr for 'Salut {name'"
    );
    assert_eq!(
        renderer.render(&source, None, "fr", &params! {}, true),
        "eval error in fr for '<missing>'"
    );
}

struct SourceOrKey;

impl ErrorPolicy for SourceOrKey {
    fn get_text(&self, failure: &RenderFailure<'_>) -> String {
        failure
            .render_source()
            .unwrap_or_else(|_| failure.source().key().to_string())
    }
}

#[test]
fn test_error_policy_struct() {
    let renderer = Renderer::builder()
        .error_policy(Arc::new(SourceOrKey))
        .build();
    let source = SourceString::builder()
        .string("{count} apples")
        .key("apples.count")
        .build()
        .unwrap();
    assert_eq!(
        renderer.render(&source, Some("{count} pommes"), "fr", &params! {}, true),
        "apples.count"
    );
    assert_eq!(
        renderer.render(&source, Some("{cnt} pommes"), "fr", &params! { "count" => 2 }, true),
        "2 apples"
    );
}
