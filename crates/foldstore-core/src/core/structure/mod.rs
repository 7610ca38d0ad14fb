//! Pure functions over pairing arrays.
//!
//! A pairing array has one entry per base: the index of its partner, or [`UNPAIRED`].

pub mod metrics;
pub mod pairs;

pub use pairs::UNPAIRED;
