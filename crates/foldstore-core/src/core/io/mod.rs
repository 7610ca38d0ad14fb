//! Export of derived fold data to external file formats.

pub mod curves;
