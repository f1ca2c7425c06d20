//! Quantity extraction — ordered heuristic strategies with explicit
//! rejection rules.
//!
//! **Strategy ladder, first success wins:**
//! 1. Labeled quantity ("QTY", "QUANTITY", "ORD QTY") — highest trust
//! 2. Smart scan — strip codes/amounts/free-suffixes, reject dosage,
//!    pack, serial and out-of-range tokens, then prefer the right-most
//!    survivor (quantity sits near the end of a tabular line, after the
//!    name/strength/pack columns)
//! 3. Amount-anchored — when a decimal monetary amount is present,
//!    search backward from it with a permissive upper bound

use regex::Regex;
use std::sync::LazyLock;

use crate::config::QuantityConfig;
use crate::normalize;

static RE_LABELED_QTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:ORD\s*QTY|QUANTITY|QTY)\s*[:.\-]?\s*(\d{1,5})\b").expect("Invalid regex")
});

/// Two-decimal monetary amount, e.g. "742.60".
static RE_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+\.\d{2}\b").expect("Invalid regex"));

/// Long numeric runs are item codes, not quantities.
static RE_LONG_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{6,}\b").expect("Invalid regex"));

/// "+2 FREE" / "+2F" scheme suffixes.
static RE_FREE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+\s*\d+\s*(?:FREE|F)\b").expect("Invalid regex"));

/// Pack-shape token like "10'S" / `10"S` / "10S".
static RE_PACK_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\d+['"]?S$"#).expect("Invalid regex"));

const UNIT_TOKENS: &[&str] = &["MG", "ML", "MCG", "GM", "G", "IU", "KG"];

/// Dosage values commonly misread as quantities when they open a line.
const COMMON_STRENGTH_VALUES: &[u32] = &[500, 250, 1000, 125];

/// First token below this value is a serial number, not a quantity.
const SERIAL_MAX: u32 = 10;

/// Extract an integer order quantity from one reconstructed line.
/// Returns `None` when no strategy produces a value within bounds.
pub fn extract_quantity(line: &str, config: &QuantityConfig) -> Option<u32> {
    let upper = normalize::normalize_product(line);
    if upper.is_empty() {
        return None;
    }

    if let Some(qty) = labeled_quantity(&upper, config) {
        return Some(qty);
    }
    if let Some(qty) = smart_scan(&upper, config) {
        return Some(qty);
    }
    amount_anchored(&upper, config)
}

/// Strategy 1: a quantity preceded by an explicit label token.
fn labeled_quantity(line: &str, config: &QuantityConfig) -> Option<u32> {
    let captured = RE_LABELED_QTY.captures(line)?;
    let value: u32 = captured.get(1)?.as_str().parse().ok()?;
    (value >= config.min_qty && value <= config.max_qty).then_some(value)
}

/// Strategy 2: tokenize the stripped remainder and score survivors by
/// position, right-most wins.
fn smart_scan(line: &str, config: &QuantityConfig) -> Option<u32> {
    let stripped = strip_non_quantity_spans(line);
    let tokens: Vec<&str> = stripped.split_whitespace().collect();

    let mut best: Option<(usize, u32)> = None;
    for (idx, token) in tokens.iter().enumerate() {
        if !is_pure_number(token) {
            continue;
        }
        let Ok(value) = token.parse::<u32>() else {
            continue;
        };
        if rejects_candidate(&tokens, idx, value, config) {
            continue;
        }
        // Later position scores higher; keep the right-most survivor.
        best = Some((idx, value));
    }
    best.map(|(_, value)| value)
}

/// Rejection rules for a purely-numeric token at `idx`.
fn rejects_candidate(tokens: &[&str], idx: usize, value: u32, config: &QuantityConfig) -> bool {
    let next = tokens.get(idx + 1).copied();

    // Followed by a unit token: that number is a dosage, not a quantity.
    if next.is_some_and(|n| UNIT_TOKENS.contains(&n)) {
        return true;
    }
    // Pack shape, alone or combined with the next token ("10 'S").
    if RE_PACK_TOKEN.is_match(tokens[idx]) {
        return true;
    }
    if next.is_some_and(|n| matches!(n, "S" | "'S" | "\"S")) {
        return true;
    }
    // First token below 10 is a serial number.
    if idx == 0 && value < SERIAL_MAX {
        return true;
    }
    if value > config.max_qty || value < config.min_qty {
        return true;
    }
    // Within the first three tokens, a common strength value right after
    // an alphabetic token is dosage misread as quantity.
    if idx < 3
        && COMMON_STRENGTH_VALUES.contains(&value)
        && idx > 0
        && tokens[idx - 1].chars().all(|c| c.is_ascii_alphabetic())
    {
        return true;
    }
    false
}

/// Strategy 3: permissive mode used when a decimal monetary amount is
/// present — search backward from the amount, still rejecting 4-digit
/// values at position 0–1 as item codes.
fn amount_anchored(line: &str, config: &QuantityConfig) -> Option<u32> {
    let amount = RE_AMOUNT.find(line)?;
    let before_amount = &line[..amount.start()];
    let tokens: Vec<&str> = before_amount.split_whitespace().collect();

    for (idx, token) in tokens.iter().enumerate().rev() {
        if !is_pure_number(token) {
            continue;
        }
        let Ok(value) = token.parse::<u32>() else {
            continue;
        };
        if idx <= 1 && token.len() == 4 {
            continue;
        }
        if token.len() >= 6 {
            continue;
        }
        if tokens
            .get(idx + 1)
            .is_some_and(|n| UNIT_TOKENS.contains(n) || matches!(*n, "S" | "'S" | "\"S"))
        {
            continue;
        }
        if RE_PACK_TOKEN.is_match(token) {
            continue;
        }
        if value >= config.min_qty && value <= config.max_qty_permissive {
            return Some(value);
        }
    }
    None
}

fn strip_non_quantity_spans(line: &str) -> String {
    let no_free = RE_FREE_SUFFIX.replace_all(line, " ");
    let no_amounts = RE_AMOUNT.replace_all(&no_free, " ");
    let no_codes = RE_LONG_CODE.replace_all(&no_amounts, " ");
    no_codes.to_string()
}

fn is_pure_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
#[path = "tests/quantity_tests.rs"]
mod tests;
