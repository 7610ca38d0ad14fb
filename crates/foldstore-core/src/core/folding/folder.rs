use crate::core::models::base::Base;
use crate::core::structure::metrics;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FolderError {
    #[error("Folding engine '{folder}' failed: {message}")]
    Engine { folder: String, message: String },

    #[error("Folding engine '{folder}' does not support {operation}")]
    Unsupported {
        folder: String,
        operation: &'static str,
    },
}

/// Result of scoring a structure: the total free energy and its per-position breakdown.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructureScore {
    pub free_energy: f64,
    pub nnfe: Vec<f64>,
}

/// An RNA secondary-structure engine.
///
/// Calls are synchronous; the cache issues at most one request at a time per store.
pub trait Folder {
    fn name(&self) -> &str;

    /// Computes the minimum free energy pairing of `sequence` at `temperature` (°C).
    fn fold_sequence(
        &self,
        sequence: &[Base],
        constraint_pairs: Option<&[i32]>,
        constraint: Option<&str>,
        pseudoknots: bool,
        temperature: u32,
    ) -> Result<Vec<i32>, FolderError>;

    /// Scores `pairs` against `full_sequence`, which already contains any bound oligos
    /// separated by cut markers.
    fn score_structures(
        &self,
        full_sequence: &[Base],
        pairs: &[i32],
        pseudoknots: bool,
        temperature: u32,
    ) -> Result<StructureScore, FolderError>;

    /// Base-pair probabilities as flat `(i, j, p)` triples with 1-based positions,
    /// or `None` if the engine cannot produce them.
    fn dot_plot(
        &self,
        sequence: &[Base],
        pairs: &[i32],
        temperature: u32,
        pseudoknots: bool,
    ) -> Result<Option<Vec<f64>>, FolderError>;

    fn count_gu_pairs(&self, sequence: &[Base], pairs: &[i32]) -> u32 {
        metrics::num_gu_pairs(sequence, pairs)
    }

    fn count_gc_pairs(&self, sequence: &[Base], pairs: &[i32]) -> u32 {
        metrics::num_gc_pairs(sequence, pairs)
    }

    fn count_au_pairs(&self, sequence: &[Base], pairs: &[i32]) -> u32 {
        metrics::num_au_pairs(sequence, pairs)
    }

    fn count_pairs(&self, pairs: &[i32]) -> u32 {
        metrics::num_pairs(pairs)
    }

    fn longest_stack(&self, pairs: &[i32]) -> u32 {
        metrics::longest_stack_length(pairs)
    }

    fn sequence_repetition(&self, sequence: &str, motif_length: usize) -> u32 {
        metrics::sequence_repetition(sequence, motif_length)
    }
}
