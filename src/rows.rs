//! Row reconstruction — groups positionally fragmented text tokens into
//! logical table rows.
//!
//! **Algorithm:**
//! 1. Sort tokens by vertical position (stable tiebreak: x, then text)
//! 2. Start a new row group whenever the vertical gap to the previous
//!    token exceeds `y_tolerance`
//! 3. Within a group, order tokens left-to-right and join with at least
//!    one space; a double space marks a wide horizontal gap so distinct
//!    columns stay visually separated downstream
//! 4. Drop rows shorter than `min_row_chars` as noise
//!
//! Deterministic: identical token sets produce identical output
//! regardless of input order.

use serde::{Deserialize, Serialize};

use crate::config::RowConfig;

/// A fragment of recognized text with its page coordinates. Produced by
/// an external extraction collaborator (PDF text layer, OCR engine, or
/// the spreadsheet adapter below).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionedToken {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

impl PositionedToken {
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }
}

/// One reconstructed table line. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalRow {
    raw_text: String,
}

impl LogicalRow {
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }
}

/// Vertical stride used when synthesizing positions for spreadsheet rows.
/// Comfortably larger than any sane `y_tolerance` so sheet rows never merge.
const SHEET_ROW_STRIDE: f32 = 10.0;

/// Adapt spreadsheet rows (already-cellular data) to the positional-token
/// contract: `y` increases monotonically per row, `x` follows cell order.
pub fn tokens_from_sheet_rows(sheet_rows: &[Vec<String>]) -> Vec<PositionedToken> {
    let mut tokens = Vec::new();
    for (row_idx, cells) in sheet_rows.iter().enumerate() {
        for (cell_idx, cell) in cells.iter().enumerate() {
            let trimmed = cell.trim();
            if trimmed.is_empty() {
                continue;
            }
            tokens.push(PositionedToken::new(
                trimmed,
                cell_idx as f32,
                row_idx as f32 * SHEET_ROW_STRIDE,
            ));
        }
    }
    tokens
}

/// Reconstruct ordered logical rows from tokens supplied in any order.
pub fn reconstruct_rows(tokens: &[PositionedToken], config: &RowConfig) -> Vec<LogicalRow> {
    let mut ordered: Vec<&PositionedToken> = tokens
        .iter()
        .filter(|t| !t.text.trim().is_empty())
        .collect();

    // Total order over (y, x, text) so permuted input yields identical rows.
    ordered.sort_by(|a, b| {
        a.y.total_cmp(&b.y)
            .then_with(|| a.x.total_cmp(&b.x))
            .then_with(|| a.text.cmp(&b.text))
    });

    let mut groups: Vec<Vec<&PositionedToken>> = Vec::new();
    for token in ordered {
        match groups.last_mut() {
            Some(group) => {
                let prev_y = group.last().map(|t| t.y).unwrap_or(token.y);
                if (token.y - prev_y).abs() <= config.y_tolerance {
                    group.push(token);
                } else {
                    groups.push(vec![token]);
                }
            }
            None => groups.push(vec![token]),
        }
    }

    groups
        .into_iter()
        .filter_map(|mut group| {
            group.sort_by(|a, b| a.x.total_cmp(&b.x).then_with(|| a.text.cmp(&b.text)));
            let raw_text = join_row(&group, config);
            (raw_text.len() >= config.min_row_chars).then_some(LogicalRow { raw_text })
        })
        .collect()
}

/// Join a row's tokens left-to-right. Always at least one space between
/// adjacent cells — a quantity "30" and an amount "2314.20" must never
/// fuse into "2314.2030".
fn join_row(group: &[&PositionedToken], config: &RowConfig) -> String {
    let mut line = String::new();
    let mut prev_x: Option<f32> = None;
    for token in group {
        if let Some(px) = prev_x {
            if token.x - px > config.wide_gap_threshold {
                line.push_str("  ");
            } else {
                line.push(' ');
            }
        }
        line.push_str(token.text.trim());
        prev_x = Some(token.x);
    }
    line
}

#[cfg(test)]
#[path = "tests/rows_tests.rs"]
mod tests;
