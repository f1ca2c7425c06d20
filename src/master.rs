//! Master-data snapshot types and the precomputed matching index.
//!
//! Master records are authoritative reference data, read-only to this
//! crate; an external store owns and persists them. `MasterIndex` takes
//! a full snapshot per document batch and precomputes the normalized
//! forms every resolver pass needs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::normalize;
use crate::resolve::product::gates::{self, Strength};
use crate::types::{PipelineError, PipelineResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterCustomer {
    pub customer_code: String,
    pub customer_name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterProduct {
    pub product_code: String,
    pub product_name: String,
    #[serde(default)]
    pub division: String,
    #[serde(default)]
    pub pack: String,
    #[serde(default)]
    pub box_pack: String,
}

/// One quantity tier within a promotional scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeSlab {
    pub min_qty: u32,
    pub free_qty: u32,
    #[serde(default)]
    pub scheme_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheme {
    pub product_code: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub division: Option<String>,
    /// Empty means the scheme applies to all customers.
    #[serde(default)]
    pub applicable_customers: Vec<String>,
    pub slabs: Vec<SchemeSlab>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Precomputed matching view of one master product.
#[derive(Debug, Clone)]
pub(crate) struct ProductView {
    pub norm: String,
    pub word_set: BTreeSet<String>,
    pub base: String,
    pub strength: Option<Strength>,
    pub variants: BTreeSet<String>,
    pub form: Option<&'static str>,
    pub first_token: Option<String>,
}

impl ProductView {
    fn build(product: &MasterProduct) -> Self {
        Self::from_text(&product.product_name)
    }

    /// Build the same view for free-text input so queries and candidates
    /// compare like-for-like.
    pub(crate) fn from_text(text: &str) -> Self {
        let norm = normalize::normalize_product(text);
        Self {
            word_set: normalize::word_set(&norm),
            base: gates::base_name(&norm),
            strength: gates::extract_strength(&norm),
            variants: gates::extract_variants(&norm),
            form: normalize::dosage_form(&norm),
            first_token: norm.split_whitespace().next().map(|t| t.to_string()),
            norm,
        }
    }
}

/// Read-only master snapshot with precomputed normalized names and token
/// sets. Built once per batch; safe to share across threads.
#[derive(Debug, Clone)]
pub struct MasterIndex {
    pub customers: Vec<MasterCustomer>,
    pub products: Vec<MasterProduct>,
    pub schemes: Vec<Scheme>,
    pub(crate) customer_norms: Vec<String>,
    pub(crate) product_views: Vec<ProductView>,
}

impl MasterIndex {
    pub fn new(
        customers: Vec<MasterCustomer>,
        products: Vec<MasterProduct>,
        schemes: Vec<Scheme>,
    ) -> Self {
        let customer_norms = customers
            .iter()
            .map(|c| normalize::normalize_customer(&c.customer_name))
            .collect();
        let product_views = products.iter().map(ProductView::build).collect();
        Self {
            customers,
            products,
            schemes,
            customer_norms,
            product_views,
        }
    }

    /// Load from JSON. Accepts either a combined snapshot object
    /// `{"customers": [...], "products": [...], "schemes": [...]}` or a
    /// bare array of products (legacy export format).
    pub fn from_json(json: &str) -> PipelineResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| PipelineError::MasterData(format!("Failed to parse snapshot: {e}")))?;

        match value {
            serde_json::Value::Object(ref map) if map.contains_key("products") => {
                let products: Vec<MasterProduct> =
                    serde_json::from_value(map["products"].clone()).map_err(|e| {
                        PipelineError::MasterData(format!("Failed to parse products: {e}"))
                    })?;
                let customers: Vec<MasterCustomer> =
                    serde_json::from_value(map.get("customers").cloned().unwrap_or_default())
                        .unwrap_or_default();
                let schemes: Vec<Scheme> =
                    serde_json::from_value(map.get("schemes").cloned().unwrap_or_default())
                        .unwrap_or_default();
                Ok(Self::new(customers, products, schemes))
            }
            serde_json::Value::Array(_) => {
                let products: Vec<MasterProduct> = serde_json::from_value(value).map_err(|e| {
                    PipelineError::MasterData(format!("Failed to parse products array: {e}"))
                })?;
                Ok(Self::new(Vec::new(), products, Vec::new()))
            }
            _ => Err(PipelineError::MasterData(
                "Invalid snapshot format: expected array or object with 'products' key"
                    .to_string(),
            )),
        }
    }
}

#[cfg(test)]
#[path = "tests/master_tests.rs"]
mod tests;
