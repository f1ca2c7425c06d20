pub mod errors;

pub use errors::{PipelineError, PipelineResult};
