//! Field extraction — pulls a best-guess quantity and product-name
//! substring out of one reconstructed order line.

pub mod product_name;
pub mod quantity;

use serde::{Deserialize, Serialize};

pub use product_name::extract_product_name;
pub use quantity::extract_quantity;

use crate::config::QuantityConfig;

/// Intermediate extraction result for one line. Owned by the pipeline
/// run and discarded after resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedLineItem {
    pub raw_text: String,
    /// `None` means "needs manual input", never an error.
    pub quantity: Option<u32>,
    pub product_name_guess: String,
}

/// Run both extractors over one raw line.
pub fn extract_line_item(raw_text: &str, config: &QuantityConfig) -> ExtractedLineItem {
    ExtractedLineItem {
        raw_text: raw_text.to_string(),
        quantity: extract_quantity(raw_text, config),
        product_name_guess: extract_product_name(raw_text),
    }
}
