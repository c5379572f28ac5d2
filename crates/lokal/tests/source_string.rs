//! Tests for source strings, metadata and the push payload.

use insta::assert_snapshot;
use lokal::{Labels, SourceString, SourceStringSet, ValidationError, params};

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_key_defaults_to_string() {
    let s = SourceString::builder().string("Table").build().unwrap();
    assert_eq!(s.key(), "Table");
    assert!(s.context().is_empty());
    assert_eq!(s.comment(), None);
    assert_eq!(s.character_limit(), None);
}

#[test]
fn test_explicit_key() {
    let s = SourceString::builder()
        .string("Table")
        .key("furniture.table")
        .build()
        .unwrap();
    assert_eq!(s.key(), "furniture.table");
    assert_eq!(s.string(), "Table");
}

#[test]
fn test_empty_string_is_rejected() {
    assert_eq!(
        SourceString::builder().string("").build(),
        Err(ValidationError::EmptyString)
    );
}

#[test]
fn test_character_limit_must_be_positive() {
    assert_eq!(
        SourceString::builder()
            .string("x")
            .character_limit(0)
            .build(),
        Err(ValidationError::NonPositiveCharacterLimit { limit: 0 })
    );
    assert!(
        SourceString::builder()
            .string("x")
            .character_limit(-3)
            .build()
            .is_err()
    );
}

#[test]
fn test_labels_are_normalized() {
    let s = SourceString::builder()
        .string("Open")
        .context("menu, menu, ,file")
        .tags(vec![" ui ", "ui", "verb"])
        .build()
        .unwrap();
    assert_eq!(s.context().as_slice(), ["menu", "file"]);
    assert_eq!(s.tags().as_slice(), ["ui", "verb"]);
    assert_eq!(s.context().to_string(), "menu,file");
}

#[test]
fn test_labels_from_vec_are_split_on_commas() {
    let labels = Labels::from(vec!["a,b".to_string(), "c".to_string()]);
    assert_eq!(labels.as_slice(), ["a", "b", "c"]);
    assert_eq!(Labels::from(labels.to_string()), labels);
}

// =============================================================================
// Metadata from reserved parameters
// =============================================================================

#[test]
fn test_from_metadata() {
    let p = params! {
        "count" => 2,
        "_context" => "cart",
        "_comment" => "Shown in the basket",
        "_charlimit" => 30,
        "_tags" => "checkout,ui",
        "_occurrences" => "src/cart.rs:10",
    };
    let s = SourceString::from_metadata("{count} items", None, p.metadata()).unwrap();
    assert_eq!(s.context().as_slice(), ["cart"]);
    assert_eq!(s.comment(), Some("Shown in the basket"));
    assert_eq!(s.character_limit(), Some(30));
    assert_eq!(s.tags().as_slice(), ["checkout", "ui"]);
    assert_eq!(s.occurrences().as_slice(), ["src/cart.rs:10"]);
    assert_eq!(p.len(), 1);
}

#[test]
fn test_numeric_string_character_limit() {
    let p = params! { "_charlimit" => "12" };
    let s = SourceString::from_metadata("x", None, p.metadata()).unwrap();
    assert_eq!(s.character_limit(), Some(12));
}

#[test]
fn test_invalid_character_limit_metadata() {
    let p = params! { "_charlimit" => "lots" };
    assert_eq!(
        SourceString::from_metadata("x", None, p.metadata()),
        Err(ValidationError::InvalidMetadata {
            key: "_charlimit".into(),
            value: "lots".into(),
        })
    );
}

// =============================================================================
// Merging and sets
// =============================================================================

#[test]
fn test_merge() {
    let mut first = SourceString::builder()
        .string("Save")
        .context("toolbar")
        .comment("Button label")
        .character_limit(10)
        .build()
        .unwrap();
    let second = SourceString::builder()
        .string("Save")
        .context("toolbar")
        .tags("menu")
        .character_limit(8)
        .occurrences("src/menu.rs:4")
        .build()
        .unwrap();
    first.merge(&second);

    assert_eq!(first.context().as_slice(), ["toolbar"]);
    assert_eq!(first.comment(), Some("Button label"));
    assert_eq!(first.character_limit(), Some(8));
    assert_eq!(first.tags().as_slice(), ["menu"]);
    assert_eq!(first.occurrences().as_slice(), ["src/menu.rs:4"]);
}

#[test]
fn test_set_merges_same_key() {
    let set: SourceStringSet = [
        SourceString::builder().string("A").tags("x").build().unwrap(),
        SourceString::builder().string("B").build().unwrap(),
        SourceString::builder().string("A").tags("y").build().unwrap(),
    ]
    .into_iter()
    .collect();

    assert_eq!(set.len(), 2);
    let keys: Vec<&str> = set.iter().map(SourceString::key).collect();
    assert_eq!(keys, vec!["A", "B"]);
    assert_eq!(
        set.get("A", &Labels::default()).unwrap().tags().as_slice(),
        ["x", "y"]
    );
}

#[test]
fn test_context_separates_identical_strings() {
    let open = |context: &str| {
        SourceString::builder()
            .string("Open")
            .context(context)
            .build()
            .unwrap()
    };
    let set: SourceStringSet = [open("door"), open("menu"), open("door"), open("")]
        .into_iter()
        .collect();

    assert_eq!(set.len(), 3);
    assert!(set.get("Open", &Labels::from("menu")).is_some());
    assert_eq!(open("door").key(), "Open");
    assert_eq!(open("menu, file").identity(), "Open:menu:file");

    let payload = set.push_payload(false);
    let keys: Vec<&str> = payload.data.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["Open", "Open:door", "Open:menu"]);
    assert_eq!(payload.data["Open:door"].key, "Open");
    assert_eq!(payload.data["Open:menu"].meta.context.as_slice(), ["menu"]);
}

#[test]
fn test_push_payload() {
    let mut set = SourceStringSet::new();
    set.extend([
        SourceString::builder()
            .string("{n, plural, one {# file} other {# files}}")
            .key("files.count")
            .context("sidebar")
            .comment("Number of files")
            .character_limit(20)
            .build()
            .unwrap(),
        SourceString::builder().string("Cancel").build().unwrap(),
    ]);

    let json = serde_json::to_string_pretty(&set.push_payload(true)).unwrap();
    assert_snapshot!(json, @r#"
    {
      "data": {
        "Cancel": {
          "string": "Cancel",
          "key": "Cancel",
          "meta": {}
        },
        "files.count:sidebar": {
          "string": "{n, plural, one {# file} other {# files}}",
          "key": "files.count",
          "meta": {
            "context": [
              "sidebar"
            ],
            "developer_comment": "Number of files",
            "character_limit": 20
          }
        }
      },
      "meta": {
        "purge": true
      }
    }
    "#);
}
