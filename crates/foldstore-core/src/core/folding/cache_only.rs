use super::folder::{Folder, FolderError, StructureScore};
use crate::core::models::base::Base;

/// A folder that refuses every computation.
///
/// Useful for re-deriving statistics from a record whose folds are already cached:
/// any cache miss surfaces as [`FolderError::Unsupported`] instead of a silent default.
#[derive(Debug, Default, Clone, Copy)]
pub struct CacheOnlyFolder;

impl CacheOnlyFolder {
    const NAME: &'static str = "cache-only";

    fn refuse<T>(operation: &'static str) -> Result<T, FolderError> {
        Err(FolderError::Unsupported {
            folder: Self::NAME.to_string(),
            operation,
        })
    }
}

impl Folder for CacheOnlyFolder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn fold_sequence(
        &self,
        _sequence: &[Base],
        _constraint_pairs: Option<&[i32]>,
        _constraint: Option<&str>,
        _pseudoknots: bool,
        _temperature: u32,
    ) -> Result<Vec<i32>, FolderError> {
        Self::refuse("folding")
    }

    fn score_structures(
        &self,
        _full_sequence: &[Base],
        _pairs: &[i32],
        _pseudoknots: bool,
        _temperature: u32,
    ) -> Result<StructureScore, FolderError> {
        Self::refuse("structure scoring")
    }

    fn dot_plot(
        &self,
        _sequence: &[Base],
        _pairs: &[i32],
        _temperature: u32,
        _pseudoknots: bool,
    ) -> Result<Option<Vec<f64>>, FolderError> {
        Self::refuse("dot plots")
    }
}
