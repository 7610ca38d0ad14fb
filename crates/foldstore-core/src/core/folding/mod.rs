//! # Folding Module
//!
//! The contract between the fold cache and an external RNA folding engine.
//!
//! The cache never folds anything itself. Every pairing, free energy and dot-plot it
//! stores comes from a [`Folder`] implementation; the counting helpers have default
//! implementations over [`crate::core::structure::metrics`] that engines may override.

mod cache_only;
mod folder;
#[cfg(test)]
pub(crate) mod mock;

pub use cache_only::CacheOnlyFolder;
pub use folder::{Folder, FolderError, StructureScore};
