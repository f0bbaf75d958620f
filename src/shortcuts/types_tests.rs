use super::types::*;
use crate::error::ShortcutError;

fn slug_of(keys: impl Into<KeySpec>) -> String {
    slugify(keys).unwrap().to_string()
}

// =============================================================================
// canonicalize_key
// =============================================================================

#[test]
fn test_canonicalize_key_lowercases_and_trims() {
    assert_eq!(canonicalize_key("Meta"), "meta");
    assert_eq!(canonicalize_key("  K "), "k");
    assert_eq!(canonicalize_key("Page  Up"), "page-up");
    assert_eq!(canonicalize_key(" "), "space");
    assert_eq!(canonicalize_key(""), "");
}

// =============================================================================
// Normalization
// =============================================================================

#[test]
fn test_single_key_becomes_one_combo() {
    let combos = ComboSet::normalize(&KeySpec::from("K")).unwrap();
    assert_eq!(combos.len(), 1);
    assert_eq!(combos.combos()[0].keys(), &["k".to_string()]);
}

#[test]
fn test_flat_list_is_sorted() {
    let combos = ComboSet::normalize(&KeySpec::from(["shift", "Meta", "a"])).unwrap();
    assert_eq!(combos.len(), 1);
    assert_eq!(combos.combos()[0].canonical(), "a-meta-shift");
}

#[test]
fn test_alternatives_keep_outer_order() {
    let combos = ComboSet::normalize(&KeySpec::from([["s", "meta"], ["s", "control"]])).unwrap();
    let canonical: Vec<String> = combos.iter().map(Combo::canonical).collect();
    assert_eq!(canonical, vec!["meta-s", "control-s"]);
}

#[test]
fn test_duplicate_keys_are_kept() {
    let combo = Combo::new(["k", "K"]).unwrap();
    assert_eq!(combo.len(), 2);
    assert_eq!(combo.canonical(), "k-k");
}

#[test]
fn test_empty_specs_are_rejected() {
    for spec in [
        KeySpec::Combo(Vec::new()),
        KeySpec::Alternatives(Vec::new()),
        KeySpec::Alternatives(vec![Vec::new()]),
        KeySpec::from(""),
    ] {
        assert!(matches!(
            ComboSet::normalize(&spec),
            Err(ShortcutError::EmptyKeySpec)
        ));
    }
}

#[test]
fn test_empty_inner_combo_is_dropped() {
    let spec = KeySpec::Alternatives(vec![Vec::new(), vec!["k".to_string()]]);
    let combos = ComboSet::normalize(&spec).unwrap();
    assert_eq!(combos.slug(), "k");
}

// =============================================================================
// Slugs
// =============================================================================

#[test]
fn test_slug_is_order_independent_within_combo() {
    let keys = ["meta", "shift", "k"];
    let expected = slug_of(keys);
    for permutation in [
        ["meta", "k", "shift"],
        ["shift", "meta", "k"],
        ["shift", "k", "meta"],
        ["k", "meta", "shift"],
        ["k", "shift", "meta"],
    ] {
        assert_eq!(slug_of(permutation), expected);
    }
    assert_eq!(expected, "k-meta-shift");
}

#[test]
fn test_slug_shape_equivalence() {
    assert_eq!(slug_of("k"), "k");
    assert_eq!(slug_of(["k"]), "k");
    assert_eq!(slug_of([["k"]]), "k");
}

#[test]
fn test_slug_examples() {
    assert_eq!(slug_of("?"), "?");
    assert_eq!(slug_of(["meta", "k"]), "k-meta");
    assert_eq!(slug_of([["control", "s"], ["meta", "s"]]), "control-s|meta-s");
    assert_eq!(slug_of([["?"], ["/"]]), "?|/");
}

#[test]
fn test_slug_is_case_and_whitespace_insensitive() {
    assert_eq!(slug_of(" Escape "), slug_of("escape"));
    assert_eq!(slug_of("test string"), "test-string");
    assert_eq!(slug_of(["META", "K"]), slug_of(["meta", "k"]));
}

#[test]
fn test_slug_depends_on_alternative_order() {
    assert_ne!(slug_of([["a"], ["b"]]), slug_of([["b"], ["a"]]));
}

#[test]
fn test_slug_of_empty_spec_fails() {
    assert!(slugify(KeySpec::Combo(Vec::new())).is_err());
}

// =============================================================================
// KeySpec::parse
// =============================================================================

#[test]
fn test_parse_shapes() {
    assert_eq!(KeySpec::parse("?").unwrap(), KeySpec::from("?"));
    assert_eq!(KeySpec::parse("meta+k").unwrap(), KeySpec::from(["meta", "k"]));
    assert_eq!(
        KeySpec::parse("meta + k | ctrl + k").unwrap(),
        KeySpec::from([["meta", "k"], ["ctrl", "k"]])
    );
}

#[test]
fn test_parse_literal_plus_and_pipe() {
    assert_eq!(KeySpec::parse("+").unwrap(), KeySpec::from("+"));
    assert_eq!(KeySpec::parse("|").unwrap(), KeySpec::from("|"));
    assert_eq!(
        KeySpec::parse("shift++").unwrap(),
        KeySpec::from(["shift", "+"])
    );
}

#[test]
fn test_parse_rejects_empty_keys() {
    assert!(matches!(
        KeySpec::parse("   "),
        Err(ShortcutError::InvalidKeySpec(_))
    ));
    assert!(matches!(
        KeySpec::parse("meta+"),
        Err(ShortcutError::InvalidKeySpec(_))
    ));
    assert!(matches!(
        KeySpec::parse("a || b"),
        Err(ShortcutError::InvalidKeySpec(_))
    ));
}

#[test]
fn test_parse_plus_and_pipe_as_keys_anywhere() {
    assert_eq!(
        KeySpec::parse("++shift").unwrap(),
        KeySpec::from(["+", "shift"])
    );
    assert_eq!(
        KeySpec::parse("shift+|").unwrap(),
        KeySpec::from(["shift", "|"])
    );
    assert_eq!(
        KeySpec::parse("| | shift++").unwrap(),
        KeySpec::from(vec![vec!["|"], vec!["shift", "+"]])
    );
}

#[test]
fn test_key_spec_display_is_parseable() {
    let spec = KeySpec::from([["meta", "k"], ["ctrl", "k"]]);
    assert_eq!(spec.to_string(), "meta+k | ctrl+k");
    assert_eq!(KeySpec::parse(&spec.to_string()).unwrap(), spec);
}

#[test]
fn test_key_spec_display_parses_back_to_same_slug() {
    for spec in [
        KeySpec::from(["+", "shift"]),
        KeySpec::from(["shift", "|"]),
        KeySpec::from([["|"], ["+"]]),
        KeySpec::from(["shift", "+", "meta"]),
        KeySpec::from(" "),
        KeySpec::from(["Page Up", "shift"]),
    ] {
        let text = spec.to_string();
        let parsed = KeySpec::parse(&text)
            .unwrap_or_else(|e| panic!("'{}' failed to parse: {}", text, e));
        assert_eq!(parsed.slug().unwrap(), spec.slug().unwrap(), "text '{}'", text);
    }
    assert_eq!(KeySpec::from(["+", "shift"]).to_string(), "++shift");
    assert_eq!(KeySpec::from(" ").to_string(), "space");
}

#[test]
fn test_key_spec_serde_shapes() {
    let spec: KeySpec = serde_json::from_str(r#""meta+k""#).unwrap();
    assert_eq!(spec, KeySpec::from(["meta", "k"]));
    let spec: KeySpec = serde_json::from_str(r#"["meta","k"]"#).unwrap();
    assert_eq!(spec, KeySpec::from(["meta", "k"]));
    let spec: KeySpec = serde_json::from_str(r#"[["?"],["/"]]"#).unwrap();
    assert_eq!(spec, KeySpec::from([["?"], ["/"]]));

    assert_eq!(serde_json::to_string(&KeySpec::from("?")).unwrap(), r#""?""#);
}

#[test]
fn test_combo_has_modifier() {
    let modifiers = vec!["meta".to_string(), "control".to_string()];
    assert!(Combo::new(["k", "Meta"]).unwrap().has_modifier(&modifiers));
    assert!(!Combo::new(["shift", "k"]).unwrap().has_modifier(&modifiers));
}

#[test]
fn test_combo_set_mentions() {
    let combos = ComboSet::normalize(&KeySpec::from([["meta", "k"], ["ctrl", "k"]])).unwrap();
    assert!(combos.mentions("CTRL"));
    assert!(combos.mentions("k"));
    assert!(!combos.mentions("shift"));
}
