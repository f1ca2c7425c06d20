//! Master-data resolution — maps free-text customer and product strings
//! onto canonical master records via staged exact/fuzzy matching with
//! veto gates, auto-accept thresholds, and manual-review fallbacks.

pub mod customer;
pub mod product;
pub mod types;

pub use customer::resolve_customer;
pub use product::resolve_product;
pub use types::{CustomerMatch, MatchSource, MatchStrategy, ProductMatch, ScoredCandidate};
