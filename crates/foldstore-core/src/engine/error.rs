use crate::core::folding::FolderError;
use crate::core::models::params::ParamError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Folding failed: {source}")]
    Folder {
        #[from]
        source: FolderError,
    },

    #[error("Invalid parameter value: {source}")]
    Param {
        #[from]
        source: ParamError,
    },

    #[error("No pairing cached at {temperature}°C (pseudoknots: {pseudoknots})")]
    MissingPairing { temperature: u32, pseudoknots: bool },

    #[error("Folding engine returned no dot plot at {temperature}°C")]
    DotPlotUnavailable { temperature: u32 },

    #[error("Target oligos are set but no oligo order is defined")]
    MissingOligoOrder,

    #[error("Invalid oligo order {order:?} for {count} oligo(s)")]
    InvalidOligoOrder { order: Vec<usize>, count: usize },

    #[error("Error parsing UndoBlock JSON: {0}")]
    Deserialization(String),

    #[error("Failed to serialize UndoBlock: {0}")]
    Serialization(String),

    #[error("Internal logic error: {0}")]
    Internal(String),
}
