use super::*;
use crate::master::MasterProduct;

fn product(code: &str, name: &str) -> MasterProduct {
    MasterProduct {
        product_code: code.to_string(),
        product_name: name.to_string(),
        division: String::new(),
        pack: String::new(),
        box_pack: String::new(),
    }
}

fn fixture_index() -> MasterIndex {
    MasterIndex::new(
        Vec::new(),
        vec![
            product("P40", "ARBITEL 40MG"),
            product("P80", "ARBITEL 80MG"),
            product("PMET", "METFORMIN 500MG"),
            product("PMETSR", "METFORMIN SR 500MG"),
            product("PZD", "ZINCOVIT DROPS"),
        ],
        Vec::new(),
    )
}

fn resolve(line: &str, raw: Option<&str>) -> ProductMatch {
    resolve_product(line, raw, &fixture_index(), &ProductMatchConfig::default())
}

#[test]
fn test_exact_name_resolves_with_full_confidence() {
    let result = resolve("ARBITEL 40MG", None);
    assert_eq!(result.source, MatchSource::Exact);
    assert_eq!(result.confidence, 1.0);
    assert_eq!(result.matched.unwrap().product_code, "P40");
}

#[test]
fn test_reordered_tokens_still_count_as_exact() {
    let result = resolve("40MG ARBITEL", None);
    assert_eq!(result.source, MatchSource::Exact);
    assert_eq!(result.matched.unwrap().product_code, "P40");
}

#[test]
fn test_strength_gate_vetoes_strengthless_input() {
    // Bare "ARBITEL" must never auto-select between the 40MG and 80MG
    // products.
    let result = resolve("ARBITEL", None);
    assert_eq!(result.source, MatchSource::None);
    assert!(result.matched.is_none());
}

#[test]
fn test_variant_gate_separates_sr_from_plain() {
    let plain = resolve("METFORMIN 500MG", None);
    assert_eq!(plain.matched.unwrap().product_code, "PMET");
    assert!(plain.candidates.iter().all(|c| c.code != "PMETSR"));

    let sr = resolve("METFORMIN SR 500MG", None);
    assert_eq!(sr.matched.unwrap().product_code, "PMETSR");
    assert!(sr.candidates.iter().all(|c| c.code != "PMET"));
}

#[test]
fn test_brand_gate_blocks_distributor_prefix() {
    // MICRO opening token with a differing candidate first token blocks
    // the otherwise-plausible ARBITEL match.
    let result = resolve("MICRO ARBITEL 40MG", None);
    assert!(result.candidates.iter().all(|c| c.code != "P40"));
    assert!(result.matched.is_none());
}

#[test]
fn test_candidate_search_unique_survivor() {
    // No ladder strategy fires (forms differ, no containment), but the
    // base name isolates a single gate survivor.
    let result = resolve("ZINCOVIT SYRUP", None);
    assert_eq!(result.source, MatchSource::FuzzyAuto);
    assert_eq!(result.confidence, 0.60);
    assert_eq!(result.matched.unwrap().product_code, "PZD");
    assert_eq!(result.candidates[0].strategy, MatchStrategy::CandidateSearch);
}

#[test]
fn test_candidate_search_ambiguous_goes_manual() {
    let index = MasterIndex::new(
        Vec::new(),
        vec![
            product("PZD", "ZINCOVIT DROPS"),
            product("PZT", "ZINCOVIT TABLET"),
        ],
        Vec::new(),
    );
    let result = resolve_product("ZINCOVIT SYRUP", None, &index, &ProductMatchConfig::default());
    assert_eq!(result.source, MatchSource::ManualRequired);
    assert!(result.matched.is_none());
    assert_eq!(result.candidates.len(), 2);
}

#[test]
fn test_reverse_lookup_recovers_from_bad_extraction() {
    // Extraction produced garbage but the raw line still carries the
    // full product name.
    let result = resolve("XQZWJ", Some("1 205116 ARBITEL 40MG 15'S 742.60"));
    assert_eq!(result.source, MatchSource::ReverseLookup);
    assert_eq!(result.confidence, 0.85);
    assert_eq!(result.matched.unwrap().product_code, "P40");
}

#[test]
fn test_reverse_lookup_respects_strength_gate() {
    // The raw line says 80MG; the 40MG product is contained nowhere and
    // the 80MG one must win.
    let result = resolve("XQZWJ", Some("9 ARBITEL 80MG 300.00"));
    assert_eq!(result.source, MatchSource::ReverseLookup);
    assert_eq!(result.matched.unwrap().product_code, "P80");
}

#[test]
fn test_reverse_lookup_respects_variant_gate() {
    // Master holds only the plain product; a raw line carrying the SR
    // variant must not fall back to it.
    let index = MasterIndex::new(
        Vec::new(),
        vec![product("PGLY", "GLYCOMET 500")],
        Vec::new(),
    );
    let result = resolve_product(
        "GLYCOMET 500 SR 30",
        Some("5 GLYCOMET 500 SR 30 742.60"),
        &index,
        &ProductMatchConfig::default(),
    );
    assert_eq!(result.source, MatchSource::None);
    assert!(result.matched.is_none());

    // With the SR product present, the same raw line resolves to it.
    let index = MasterIndex::new(
        Vec::new(),
        vec![
            product("PGLY", "GLYCOMET 500"),
            product("PGLYSR", "GLYCOMET 500 SR"),
        ],
        Vec::new(),
    );
    let result = resolve_product(
        "XQZWJ",
        Some("5 GLYCOMET 500 SR 30 742.60"),
        &index,
        &ProductMatchConfig::default(),
    );
    assert_eq!(result.source, MatchSource::ReverseLookup);
    assert_eq!(result.matched.unwrap().product_code, "PGLYSR");
}

#[test]
fn test_reverse_lookup_recovers_empty_extraction() {
    // A row opening with a lone 0 column marker truncates extraction to
    // nothing; the raw line still identifies the product.
    let result = resolve("", Some("0 ARBITEL 40MG 742.60 10"));
    assert_eq!(result.source, MatchSource::ReverseLookup);
    assert_eq!(result.matched.unwrap().product_code, "P40");
}

#[test]
fn test_low_confidence_floor_flags_typo_guess() {
    let result = resolve("ARBITAL 40MG", None);
    assert_eq!(result.source, MatchSource::FuzzyAuto);
    assert!(result.low_confidence);
    assert_eq!(result.matched.unwrap().product_code, "P40");
    assert_eq!(result.candidates[0].strategy, MatchStrategy::LowConfidenceFloor);
}

#[test]
fn test_disabled_floor_returns_no_match() {
    let config = ProductMatchConfig {
        low_confidence_floor: None,
        ..ProductMatchConfig::default()
    };
    let result = resolve_product("ARBITAL 40MG", None, &fixture_index(), &config);
    assert_eq!(result.source, MatchSource::None);
    assert!(!result.low_confidence);
}

#[test]
fn test_empty_inputs() {
    assert_eq!(resolve("", None).source, MatchSource::None);

    let empty = MasterIndex::new(Vec::new(), Vec::new(), Vec::new());
    let result = resolve_product("ARBITEL 40MG", None, &empty, &ProductMatchConfig::default());
    assert_eq!(result.source, MatchSource::None);
}
