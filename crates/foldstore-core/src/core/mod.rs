//! # Core Module
//!
//! Stateless building blocks of the fold cache: data models, pure structure metrics,
//! the folding-engine contract, and file export.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Sequences, oligos, target conditions, parameters, records
//! - **Structure Metrics** ([`structure`]) - Pair counting, stack length, motif repetition
//! - **Folding Contract** ([`folding`]) - The [`folding::Folder`] trait implemented by engines
//! - **File I/O** ([`io`]) - CSV export of melt curves and dot plots
//!
//! Nothing in this module holds state between calls; caching lives in [`crate::engine`].

pub mod folding;
pub mod io;
pub mod models;
pub mod structure;
