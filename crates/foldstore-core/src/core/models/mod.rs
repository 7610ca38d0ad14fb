//! # Core Models Module
//!
//! Plain data types shared by every layer of the fold cache.
//!
//! ## Key Components
//!
//! - [`base`] - Nucleotide codes and sequence text conversion
//! - [`oligo`] - Auxiliary strands and their attachment modes
//! - [`fields`] - Typed views over loosely structured content that keep unknown keys
//! - [`target`] - Target conditions: the intended fold topology, with unknown fields preserved
//! - [`params`] - The typed per-fold metric record and its legacy slot enumeration
//! - [`plot`] - Plot-ready dot-plot and melt-curve data
//! - [`record`] - The frozen persisted record layout
//!
//! ## Usage
//!
//! ```ignore
//! use foldstore::core::models::base::parse_sequence;
//! use foldstore::core::models::params::{FoldParameters, ParamKind};
//!
//! let sequence = parse_sequence("GGGAAACCC")?;
//! let mut params = FoldParameters::new();
//! params.set(ParamKind::FreeEnergy, -3.4)?;
//! ```

pub mod base;
pub mod fields;
pub mod oligo;
pub mod params;
pub mod plot;
pub mod record;
pub mod target;
