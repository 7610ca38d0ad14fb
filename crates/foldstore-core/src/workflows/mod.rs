//! # Workflows Module
//!
//! High-level entry points that tie the fold cache and a folding engine together.
//!
//! - **Evaluation** ([`evaluate`]) - builds a populated [`crate::engine::undo_block::UndoBlock`]
//!   for one design state: reference fold, basic metrics and an optional thermal sweep.

pub mod evaluate;
