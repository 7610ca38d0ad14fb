//! # foldstore
//!
//! A cache for RNA secondary-structure fold results and the statistics derived from them.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three layers from the stateless data up to the public API.
//!
//! - **[`core`]: The Foundation.** Stateless models (bases, fold parameters, target
//!   conditions, plot data), structure metrics over pairing arrays, the [`core::folding::Folder`]
//!   contract for external folding engines, and CSV export.
//!
//! - **[`engine`]: The Logic Core.** The stateful [`engine::undo_block::UndoBlock`] cache with
//!   its temperature-indexed fold table, the thermal profiler, oligo index remapping and the
//!   legacy record adapter.
//!
//! - **[`workflows`]: The Public API.** End-to-end evaluation of a design state against a
//!   folding engine.

pub mod core;
pub mod engine;
pub mod workflows;
