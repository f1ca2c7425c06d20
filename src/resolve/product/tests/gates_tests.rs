use super::*;

#[test]
fn test_extract_strength_with_unit() {
    let strength = extract_strength("ARBITEL 40MG 15'S").unwrap();
    assert_eq!(strength.primary, 40.0);
    assert!(strength.secondary.is_none());
}

#[test]
fn test_extract_strength_combo() {
    let strength = extract_strength("AUGMENTIN 500/125MG").unwrap();
    assert_eq!(strength.primary, 500.0);
    assert_eq!(strength.secondary, Some(125.0));
}

#[test]
fn test_extract_strength_bare_number_after_name() {
    let strength = extract_strength("METFORMIN 500").unwrap();
    assert_eq!(strength.primary, 500.0);
}

#[test]
fn test_extract_strength_ignores_leading_codes_and_packs() {
    // A bare leading number is a code, not a strength.
    assert!(extract_strength("205 ARBITEL").is_none());
    assert!(extract_strength("ARBITEL 15'S").is_none());
}

#[test]
fn test_extract_strength_absent() {
    assert!(extract_strength("METFORMIN").is_none());
}

#[test]
fn test_strength_compatibility_rules() {
    let s40 = extract_strength("ARBITEL 40MG");
    let s40_bare = extract_strength("ARBITEL 40");
    let s80 = extract_strength("ARBITEL 80MG");
    let none: Option<Strength> = None;

    // Equal after unit-stripping.
    assert!(strengths_compatible(s40.as_ref(), s40_bare.as_ref()));
    // Both absent.
    assert!(strengths_compatible(none.as_ref(), none.as_ref()));
    // Different values.
    assert!(!strengths_compatible(s40.as_ref(), s80.as_ref()));
    // Exactly one present: bare METFORMIN must never match METFORMIN 500MG.
    assert!(!strengths_compatible(none.as_ref(), s40.as_ref()));
    assert!(!strengths_compatible(s40.as_ref(), none.as_ref()));
}

#[test]
fn test_combo_strength_must_agree_fully() {
    let combo = extract_strength("AUGMENTIN 500/125MG");
    let plain = extract_strength("AUGMENTIN 500MG");
    assert!(!strengths_compatible(combo.as_ref(), plain.as_ref()));
}

#[test]
fn test_extract_variants() {
    let variants = extract_variants("METFORMIN SR FORTE 500MG");
    assert!(variants.contains("SR"));
    assert!(variants.contains("FORTE"));
    assert_eq!(variants.len(), 2);
    assert!(extract_variants("METFORMIN 500MG").is_empty());
}

#[test]
fn test_variant_compatibility_is_set_agreement() {
    let sr = extract_variants("METFORMIN SR");
    let plain = extract_variants("METFORMIN");
    let sr2 = extract_variants("METFORMIN SR 500");

    assert!(variants_compatible(&sr, &sr2));
    assert!(variants_compatible(&plain, &plain));
    // A strict token on one side only is a veto in both directions.
    assert!(!variants_compatible(&sr, &plain));
    assert!(!variants_compatible(&plain, &sr));
}

#[test]
fn test_brand_block() {
    // Noise-brand first token with differing candidate first token.
    assert!(brand_blocked(Some("MICRO"), Some("ARBITEL")));
    // Same first token passes.
    assert!(!brand_blocked(Some("MICRO"), Some("MICRO")));
    // Non-noise first token never blocks.
    assert!(!brand_blocked(Some("ARBITEL"), Some("CROCIN")));
    assert!(!brand_blocked(None, Some("CROCIN")));
}

#[test]
fn test_base_name_strips_modifiers() {
    assert_eq!(base_name("METFORMIN SR 500MG 10'S"), "METFORMIN");
    assert_eq!(base_name("CROCIN ADVANCE TAB 650"), "CROCIN ADVANCE");
    assert_eq!(base_name("ARBITEL 40MG"), "ARBITEL");
}
