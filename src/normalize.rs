//! Text normalization for order lines and master-data names.
//! Handles transliteration, tokenization, noise stripping, and common
//! abbreviation repair.

use deunicode::deunicode;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Strips everything except letters, digits and spaces.
static RE_NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Z0-9 ]").expect("Invalid regex"));

/// Same, but protects `/`, `-`, `+` and `.` — they are load-bearing in
/// product names (dose ratios, compound names, suffix flags, decimals).
static RE_NON_PRODUCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^A-Z0-9/\-+.'" ]"#).expect("Invalid regex"));

/// Leading trade prefixes on customer names ("M/S Foo Traders").
static RE_CUSTOMER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:M/S\.?|MS|M)\s+").expect("Invalid regex"));

/// Trailing legal-entity suffixes, longest first so "PVT LTD" wins over "LTD".
const LEGAL_SUFFIXES: &[&str] = &[
    "PRIVATE LIMITED",
    "PVT LTD",
    "PVT LIMITED",
    "AND COMPANY",
    "LIMITED",
    "LTD",
    "LLP",
    "CORP",
    "INC",
    "CO",
];

/// Trailing city/state abbreviations appended by order clerks.
const LOCATION_SUFFIXES: &[&str] = &[
    "MUM", "DEL", "BLR", "HYD", "CHN", "KOL", "PNQ", "AHM", "MH", "DL", "KA", "TN", "GJ", "UP",
    "WB", "RJ", "MP", "AP", "TS", "KL", "HR", "PB",
];

/// Dosage-form aliases, including common abbreviations and OCR typos,
/// mapped to a canonical form keyword.
const FORM_ALIASES: &[(&str, &str)] = &[
    ("TAB", "TABLET"),
    ("TABS", "TABLET"),
    ("TABLET", "TABLET"),
    ("TABLETS", "TABLET"),
    ("TABLEST", "TABLET"),
    ("TBALET", "TABLET"),
    ("CAP", "CAPSULE"),
    ("CAPS", "CAPSULE"),
    ("CAPSUL", "CAPSULE"),
    ("CAPSULE", "CAPSULE"),
    ("CAPSULES", "CAPSULE"),
    ("INJ", "INJECTION"),
    ("INJEC", "INJECTION"),
    ("INJECTION", "INJECTION"),
    ("SYP", "SYRUP"),
    ("SYR", "SYRUP"),
    ("SYRP", "SYRUP"),
    ("SYRUP", "SYRUP"),
    ("SUSP", "SUSPENSION"),
    ("SUSPENSION", "SUSPENSION"),
    ("OINT", "OINTMENT"),
    ("OINTMENT", "OINTMENT"),
    ("CRM", "CREAM"),
    ("CREAM", "CREAM"),
    ("GEL", "GEL"),
    ("DROP", "DROPS"),
    ("DROPS", "DROPS"),
    ("SOLN", "SOLUTION"),
    ("SOLUTION", "SOLUTION"),
];

/// Transliterate to Latin, uppercase, trim.
pub fn fold(text: &str) -> String {
    deunicode(text).to_uppercase().trim().to_string()
}

/// Normalize for generic matching: fold, strip punctuation, collapse
/// whitespace. Idempotent.
pub fn normalize_basic(text: &str) -> String {
    let folded = fold(text);
    let clean = RE_NON_ALNUM.replace_all(&folded, " ");
    collapse(&clean)
}

/// Normalize a product line while keeping `/`, `-`, `+`, `.`, and the
/// quote characters that pack notation (`15'S`) relies on. Idempotent.
pub fn normalize_product(text: &str) -> String {
    let folded = fold(text);
    let clean = RE_NON_PRODUCT.replace_all(&folded, " ");
    collapse(&clean)
}

/// Normalize a customer name: fold, strip punctuation, drop leading
/// trade prefixes and trailing legal/location suffixes. Idempotent.
pub fn normalize_customer(text: &str) -> String {
    let folded = fold(text);
    // Prefix strip happens before punctuation removal so "M/S." is seen whole.
    let unprefixed = RE_CUSTOMER_PREFIX.replace(&folded, "");
    let clean = RE_NON_ALNUM.replace_all(&unprefixed, " ");
    let mut tokens: Vec<&str> = clean.split_whitespace().collect();

    // A bare "M" / "MS" leading token can survive when the prefix was
    // already punctuation-split in the source text.
    while tokens.len() > 1 && matches!(tokens[0], "M" | "MS") {
        tokens.remove(0);
    }

    strip_trailing_suffixes(&mut tokens);
    tokens.join(" ")
}

fn strip_trailing_suffixes(tokens: &mut Vec<&str>) {
    loop {
        let mut stripped = false;
        for suffix in LEGAL_SUFFIXES {
            let suffix_tokens: Vec<&str> = suffix.split(' ').collect();
            if tokens.len() > suffix_tokens.len()
                && tokens[tokens.len() - suffix_tokens.len()..] == suffix_tokens[..]
            {
                tokens.truncate(tokens.len() - suffix_tokens.len());
                stripped = true;
                break;
            }
        }
        if !stripped {
            if tokens.len() > 1 && LOCATION_SUFFIXES.contains(tokens.last().unwrap_or(&"")) {
                tokens.pop();
                stripped = true;
            }
        }
        if !stripped {
            break;
        }
    }
}

/// Split normalized text into tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(|t| t.to_string()).collect()
}

/// Tokens as an ordered set for order-independent comparison.
pub fn word_set(text: &str) -> BTreeSet<String> {
    text.split_whitespace().map(|t| t.to_string()).collect()
}

/// Canonical dosage form for a single token, if it is a form keyword,
/// abbreviation, or known typo.
pub fn canonical_form(token: &str) -> Option<&'static str> {
    FORM_ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, canonical)| *canonical)
}

/// First dosage-form keyword found in the text, canonicalized.
pub fn dosage_form(text: &str) -> Option<&'static str> {
    text.split_whitespace().find_map(canonical_form)
}

/// First word longer than 3 characters — brand names outrank generic
/// suffix noise in fuzzy scoring.
pub fn first_significant_word(text: &str) -> Option<&str> {
    text.split_whitespace().find(|w| w.len() > 3)
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
