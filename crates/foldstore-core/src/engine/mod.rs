//! # Engine Module
//!
//! The stateful fold-result cache and everything derived from it.
//!
//! ## Overview
//!
//! Folding an RNA sequence is expensive, so every pairing, free energy and dot plot an
//! external [`crate::core::folding::Folder`] produces is kept in an [`undo_block::UndoBlock`],
//! keyed by temperature and pseudoknot mode. Derived statistics are computed from the cache
//! and written back into it, so nothing is ever folded twice for the same condition.
//!
//! ## Architecture
//!
//! - **Fold table** ([`cache`]) - sparse `(pseudoknots, temperature)` keyed storage
//! - **Fold results** ([`undo_block`]) - the block itself and its basic metrics
//! - **Thermal profiling** ([`thermal`]) - temperature sweep, scores and melting point
//! - **Oligo remapping** ([`oligo_map`]) - index maps for reordered oligo strands
//! - **Persistence** ([`record`]) - conversion to and from the legacy record format
//! - **Configuration** ([`config`]) - sweep and melting parameters
//! - **Progress Monitoring** ([`progress`]) - callbacks for long sweeps
//! - **Error Handling** ([`error`])

pub mod cache;
pub mod config;
pub mod error;
pub mod oligo_map;
pub mod progress;
pub mod record;
pub mod thermal;
pub mod undo_block;
