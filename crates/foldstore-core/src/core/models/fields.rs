//! Typed views over loosely structured JSON objects.
//!
//! Target conditions and oligo definitions come from puzzle content that predates any
//! schema. Known keys are lifted into typed fields only when their value has the expected
//! shape; every other key, `null` and odd-typed values included, stays in an [`Extra`] bag
//! and is written back exactly as it was read.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type Extra = Map<String, Value>;

/// A number that legacy content sometimes stores as a numeric string (e.g. `"3"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(serde_json::Number),
    Text(String),
}

impl NumericField {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumericField::Number(n) => n.as_f64(),
            NumericField::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Moves `key` out of `fields` when its value parses as `T`.
///
/// A `null` or mistyped value is left in place, so serializing the typed field next to
/// the remaining bag reproduces the input.
pub(crate) fn take_typed<T: DeserializeOwned>(fields: &mut Extra, key: &str) -> Option<T> {
    let value = fields.get(key)?;
    if value.is_null() {
        return None;
    }
    let typed = T::deserialize(value).ok()?;
    fields.remove(key);
    Some(typed)
}
