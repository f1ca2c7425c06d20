//! rxingest — purchase-order ingestion core.
//!
//! Turns positionally fragmented text tokens from scanned pharmaceutical
//! purchase orders into normalized order lines that reference a canonical
//! customer and product master:
//!
//! 1. [`rows`] reconstructs logical table rows from `{text, x, y}` tokens.
//! 2. [`extract`] pulls a best-guess quantity and product-name substring
//!    out of each reconstructed line.
//! 3. [`resolve`] maps free-text customer and product strings onto master
//!    data via staged exact/fuzzy matching with veto gates.
//! 4. [`scheme`] applies quantity-based promotional slabs.
//! 5. [`pipeline`] wires the stages together per document, fanning out
//!    over rows with rayon.
//!
//! All "no confident match" outcomes are values (`ManualRequired`,
//! `None` sources), never errors. Master snapshots are read-only for the
//! duration of a batch, so concurrent row processing needs no locking.

pub mod config;
pub mod extract;
pub mod master;
pub mod normalize;
pub mod pipeline;
pub mod resolve;
pub mod rows;
pub mod scheme;
pub mod types;

pub use config::PipelineConfig;
pub use master::{MasterCustomer, MasterIndex, MasterProduct, Scheme, SchemeSlab};
pub use pipeline::{process_document, DocumentResult, ResolvedLine};
pub use resolve::{CustomerMatch, MatchSource, ProductMatch, ScoredCandidate};
pub use rows::{LogicalRow, PositionedToken};
pub use types::{PipelineError, PipelineResult};
