//! Product-name extraction — walks a reconstructed line and accumulates
//! name tokens until a column-boundary marker is hit.
//!
//! Boundary markers (truncate the accumulated name):
//! - a lone "0" token (start of the price/free/discount columns)
//! - a pack-shape token (`10'S`)
//! - a number immediately followed by a standalone "S" (split pack)
//!
//! Kept shapes: `[A-Z0-9\-+/]+`, bare decimals, dosage-with-unit tokens.
//! `/`, `-`, `+` are protected — they carry dose ratios, compound names
//! and suffix flags.

use regex::Regex;
use std::sync::LazyLock;

use crate::normalize;

static RE_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\.\d{2}\b").expect("Invalid regex"));

static RE_PACK_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\d+['"]?S$"#).expect("Invalid regex"));

static RE_NAME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9\-+/]+$").expect("Invalid regex"));

static RE_BARE_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+$").expect("Invalid regex"));

/// Dosage shape with optional combo and unit, e.g. "40MG", "500/125MG",
/// "2.5", "625".
static RE_DOSAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+(\.\d+)?(/\d+(\.\d+)?)?[A-Z]*$").expect("Invalid regex")
});

/// Extract the best-guess product-name substring from one raw line.
/// Idempotent: re-running on its own output changes nothing.
pub fn extract_product_name(line: &str) -> String {
    let upper = normalize::normalize_product(line);
    let no_prices = RE_PRICE.replace_all(&upper, " ");
    let mut tokens: Vec<&str> = no_prices.split_whitespace().collect();

    strip_code_prefixes(&mut tokens);

    let mut kept: Vec<&str> = Vec::new();
    for (idx, token) in tokens.iter().enumerate() {
        // Column-boundary markers end the name outright.
        if *token == "0" {
            break;
        }
        if RE_PACK_TOKEN.is_match(token) {
            break;
        }
        if is_pure_number(token)
            && tokens
                .get(idx + 1)
                .is_some_and(|n| matches!(*n, "S" | "'S" | "\"S"))
        {
            break;
        }

        if RE_NAME_TOKEN.is_match(token)
            || RE_BARE_DECIMAL.is_match(token)
            || RE_DOSAGE.is_match(token)
        {
            kept.push(*token);
            continue;
        }

        // Unrecognized noise before the name starts is skipped; after at
        // least one token has been kept it ends the accumulation.
        if !kept.is_empty() {
            break;
        }
    }

    kept.join(" ")
}

/// Strip a short serial-number prefix (1–3 digits) and a SAP-code prefix
/// (5–8 digits) when they open the line.
fn strip_code_prefixes(tokens: &mut Vec<&str>) {
    if tokens
        .first()
        .is_some_and(|t| is_pure_number(t) && (1..=3).contains(&t.len()))
    {
        tokens.remove(0);
    }
    if tokens
        .first()
        .is_some_and(|t| is_pure_number(t) && (5..=8).contains(&t.len()))
    {
        tokens.remove(0);
    }
}

fn is_pure_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
#[path = "tests/product_name_tests.rs"]
mod tests;
