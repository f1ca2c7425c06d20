//! Compatibility gates — vetoes evaluated before any textual scoring.
//!
//! Each gate exists to kill a specific class of false positive. A wrong
//! product match on a pharmacy order is a safety issue, so a candidate
//! failing any gate is removed from consideration entirely, regardless
//! of how well its text scores.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use crate::normalize;

/// Strength token: number, optional "/"-combo, optional unit.
/// Pure numbers qualify only as standalone tokens (checked separately).
static RE_STRENGTH_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)(?:/(\d+(?:\.\d+)?))?(MG|MCG|GM|ML|G|IU|KG)?$")
        .expect("Invalid regex")
});

static RE_PACK_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\d+['"]?S$"#).expect("Invalid regex"));

/// Distributor prefixes that show up as the first token of order lines
/// but are not part of any product's identity.
const NOISE_BRANDS: &[&str] = &["MICRO", "RAJ", "DIST"];

/// Product-name modifiers whose presence/absence is a hard identity
/// differentiator: "METFORMIN SR" is a different product from
/// "METFORMIN", never a spelling variant of it.
const STRICT_VARIANTS: &[&str] = &[
    "OD", "SR", "MR", "XL", "XR", "CR", "ER", "LA", "DSR", "DS", "CV", "LS", "MT", "HT", "H",
    "AT", "FORTE", "PLUS", "GOLD", "TRIO", "DUO", "KID", "JUNIOR",
];

/// Numeric strength extracted from a product string, unit-stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct Strength {
    pub primary: f64,
    /// Second component of a "500/125" combo.
    pub secondary: Option<f64>,
}

/// Extract the first strength-shaped token from a normalized product
/// string. A bare number counts only when it is not pack notation; a
/// unit suffix always qualifies.
pub fn extract_strength(normalized: &str) -> Option<Strength> {
    let mut seen_alpha = false;
    for token in normalized.split_whitespace() {
        if RE_PACK_TOKEN.is_match(token) {
            continue;
        }
        if let Some(caps) = RE_STRENGTH_TOKEN.captures(token) {
            let has_unit = caps.get(3).is_some();
            let pure_number = token.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '/');
            // A bare leading number is a code or serial, not a strength;
            // only trust it once the name proper has started.
            if !has_unit && !(pure_number && seen_alpha) {
                continue;
            }
            let primary: f64 = caps.get(1)?.as_str().parse().ok()?;
            let secondary = caps.get(2).and_then(|m| m.as_str().parse().ok());
            return Some(Strength { primary, secondary });
        }
        if token.chars().any(|c| c.is_ascii_alphabetic()) {
            seen_alpha = true;
        }
    }
    None
}

/// Both present → equal after unit-stripping; both absent → compatible;
/// exactly one present → incompatible. A bare "METFORMIN" must never
/// auto-match "METFORMIN 500MG".
pub fn strengths_compatible(a: Option<&Strength>, b: Option<&Strength>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(left), Some(right)) => {
            approx_eq(left.primary, right.primary)
                && match (left.secondary, right.secondary) {
                    (None, None) => true,
                    (Some(ls), Some(rs)) => approx_eq(ls, rs),
                    _ => false,
                }
        }
        _ => false,
    }
}

/// Strict variant tokens present in a normalized product string.
pub fn extract_variants(normalized: &str) -> BTreeSet<String> {
    normalized
        .split_whitespace()
        .filter(|token| STRICT_VARIANTS.contains(token))
        .map(|token| token.to_string())
        .collect()
}

/// A strict variant token on one side and absent from the other is a
/// veto; the sets must agree.
pub fn variants_compatible(a: &BTreeSet<String>, b: &BTreeSet<String>) -> bool {
    a == b
}

/// Veto when the input opens with a known noise-brand token and the
/// candidate's first token differs.
pub fn brand_blocked(input_first: Option<&str>, candidate_first: Option<&str>) -> bool {
    match input_first {
        Some(first) if NOISE_BRANDS.contains(&first) => candidate_first != Some(first),
        _ => false,
    }
}

/// Normalized product string with strength, variant, pack and dosage-form
/// tokens removed — the "base name" used by fallback grouping.
pub fn base_name(normalized: &str) -> String {
    let variants = extract_variants(normalized);
    normalized
        .split_whitespace()
        .filter(|token| {
            if variants.contains(*token) {
                return false;
            }
            if normalize::canonical_form(token).is_some() {
                return false;
            }
            if RE_PACK_TOKEN.is_match(token) {
                return false;
            }
            // Any strength-shaped token drops out of the base name.
            !RE_STRENGTH_TOKEN.is_match(token)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[cfg(test)]
#[path = "tests/gates_tests.rs"]
mod tests;
