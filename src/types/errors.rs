use serde::Serialize;
use thiserror::Error;

/// Errors reserved for programming-contract violations.
///
/// Expected ambiguity ("no confident match", "extraction came up empty")
/// is never an error; those outcomes are represented as values on the
/// match/extraction result types.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Master data error: {0}")]
    MasterData(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Serialize for PipelineError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
