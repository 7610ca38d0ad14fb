use super::base::Base;
use super::fields::{Extra, NumericField, take_typed};
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// An auxiliary strand co-folded with the primary design sequence.
///
/// Only `sequence` is required. Optional fields are written back only when they were
/// read, and unrecognized keys are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Extra")]
pub struct Oligo {
    pub sequence: Vec<Base>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub malus: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concentration: Option<NumericField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl TryFrom<Extra> for Oligo {
    type Error = String;

    fn try_from(mut extra: Extra) -> Result<Self, Self::Error> {
        let sequence = take_typed(&mut extra, "sequence")
            .ok_or_else(|| "oligo has no valid `sequence`".to_string())?;
        Ok(Self {
            sequence,
            malus: take_typed(&mut extra, "malus"),
            name: take_typed(&mut extra, "name"),
            bind: take_typed(&mut extra, "bind"),
            concentration: take_typed(&mut extra, "concentration"),
            label: take_typed(&mut extra, "label"),
            extra,
        })
    }
}

impl Oligo {
    pub fn new(sequence: Vec<Base>) -> Self {
        Self {
            sequence,
            malus: None,
            name: None,
            bind: None,
            concentration: None,
            label: None,
            extra: Extra::new(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Number of positions the strand occupies in a concatenated fold,
    /// including the cut marker that precedes it.
    #[inline]
    pub fn span(&self) -> usize {
        self.sequence.len() + 1
    }
}

/// How a single bound oligo is attached to the primary sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OligoMode {
    None,
    Dimer,
    Ext3p,
    Ext5p,
    Unrecognized(i64),
}

impl OligoMode {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => OligoMode::None,
            1 => OligoMode::Dimer,
            2 => OligoMode::Ext3p,
            3 => OligoMode::Ext5p,
            other => OligoMode::Unrecognized(other),
        }
    }

    pub const fn code(self) -> i64 {
        match self {
            OligoMode::None => 0,
            OligoMode::Dimer => 1,
            OligoMode::Ext3p => 2,
            OligoMode::Ext5p => 3,
            OligoMode::Unrecognized(code) => code,
        }
    }
}
