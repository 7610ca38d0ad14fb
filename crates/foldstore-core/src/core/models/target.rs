//! Target conditions describe the fold topology a design is aiming for.
//!
//! Only a handful of fields are read by the cache. Each variant lifts those fields into
//! typed slots when they are well formed and keeps everything else, including `null` and
//! mistyped values, in its `extra` bag so that records round-trip exactly.

use super::fields::take_typed;
pub use super::fields::{Extra, NumericField};
use super::oligo::OligoMode;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Definition of one auxiliary strand inside a multistrand target.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Extra")]
pub struct OligoDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
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

impl From<Extra> for OligoDef {
    fn from(mut extra: Extra) -> Self {
        Self {
            sequence: take_typed(&mut extra, "sequence"),
            malus: take_typed(&mut extra, "malus"),
            name: take_typed(&mut extra, "name"),
            bind: take_typed(&mut extra, "bind"),
            concentration: take_typed(&mut extra, "concentration"),
            label: take_typed(&mut extra, "label"),
            extra,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Extra")]
pub struct StructureTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secstruct: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl From<Extra> for StructureTarget {
    fn from(mut extra: Extra) -> Self {
        Self {
            secstruct: take_typed(&mut extra, "secstruct"),
            extra,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Extra")]
pub struct MultistrandTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secstruct: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oligos: Option<Vec<OligoDef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fold_mode: Option<NumericField>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl From<Extra> for MultistrandTarget {
    fn from(mut extra: Extra) -> Self {
        Self {
            secstruct: take_typed(&mut extra, "secstruct"),
            oligos: take_typed(&mut extra, "oligos"),
            fold_mode: take_typed(&mut extra, "fold_mode"),
            extra,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Extra")]
pub struct AptamerTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secstruct: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding_pairs: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concentration: Option<NumericField>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl From<Extra> for AptamerTarget {
    fn from(mut extra: Extra) -> Self {
        Self {
            secstruct: take_typed(&mut extra, "secstruct"),
            site: take_typed(&mut extra, "site"),
            binding_pairs: take_typed(&mut extra, "binding_pairs"),
            bonus: take_typed(&mut extra, "bonus"),
            concentration: take_typed(&mut extra, "concentration"),
            extra,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Extra")]
pub struct OligoTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secstruct: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oligo_sequence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oligo_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oligo_concentration: Option<NumericField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oligo_bind: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oligo_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fold_mode: Option<NumericField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub malus: Option<Number>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl From<Extra> for OligoTarget {
    fn from(mut extra: Extra) -> Self {
        Self {
            secstruct: take_typed(&mut extra, "secstruct"),
            oligo_sequence: take_typed(&mut extra, "oligo_sequence"),
            oligo_name: take_typed(&mut extra, "oligo_name"),
            oligo_concentration: take_typed(&mut extra, "oligo_concentration"),
            oligo_bind: take_typed(&mut extra, "oligo_bind"),
            oligo_label: take_typed(&mut extra, "oligo_label"),
            fold_mode: take_typed(&mut extra, "fold_mode"),
            malus: take_typed(&mut extra, "malus"),
            extra,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Extra")]
pub struct AptamerOligoTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secstruct: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding_pairs: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concentration: Option<NumericField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oligo_sequence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oligo_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oligo_concentration: Option<NumericField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oligo_bind: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oligo_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fold_mode: Option<NumericField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub malus: Option<Number>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl From<Extra> for AptamerOligoTarget {
    fn from(mut extra: Extra) -> Self {
        Self {
            secstruct: take_typed(&mut extra, "secstruct"),
            site: take_typed(&mut extra, "site"),
            binding_pairs: take_typed(&mut extra, "binding_pairs"),
            bonus: take_typed(&mut extra, "bonus"),
            concentration: take_typed(&mut extra, "concentration"),
            oligo_sequence: take_typed(&mut extra, "oligo_sequence"),
            oligo_name: take_typed(&mut extra, "oligo_name"),
            oligo_concentration: take_typed(&mut extra, "oligo_concentration"),
            oligo_bind: take_typed(&mut extra, "oligo_bind"),
            oligo_label: take_typed(&mut extra, "oligo_label"),
            fold_mode: take_typed(&mut extra, "fold_mode"),
            malus: take_typed(&mut extra, "malus"),
            extra,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldTopology {
    Single,
    Multistrand,
    Aptamer,
    AptamerOligo,
    Oligo,
    Pseudoknot,
}

impl FoldTopology {
    pub const fn as_str(self) -> &'static str {
        match self {
            FoldTopology::Single => "single",
            FoldTopology::Multistrand => "multistrand",
            FoldTopology::Aptamer => "aptamer",
            FoldTopology::AptamerOligo => "aptamer+oligo",
            FoldTopology::Oligo => "oligo",
            FoldTopology::Pseudoknot => "pseudoknot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TargetConditions {
    #[serde(rename = "single")]
    Single(StructureTarget),
    #[serde(rename = "multistrand")]
    Multistrand(MultistrandTarget),
    #[serde(rename = "aptamer")]
    Aptamer(AptamerTarget),
    #[serde(rename = "aptamer+oligo")]
    AptamerOligo(AptamerOligoTarget),
    #[serde(rename = "oligo")]
    Oligo(OligoTarget),
    #[serde(rename = "pseudoknot")]
    Pseudoknot(StructureTarget),
}

impl TargetConditions {
    pub fn topology(&self) -> FoldTopology {
        match self {
            TargetConditions::Single(_) => FoldTopology::Single,
            TargetConditions::Multistrand(_) => FoldTopology::Multistrand,
            TargetConditions::Aptamer(_) => FoldTopology::Aptamer,
            TargetConditions::AptamerOligo(_) => FoldTopology::AptamerOligo,
            TargetConditions::Oligo(_) => FoldTopology::Oligo,
            TargetConditions::Pseudoknot(_) => FoldTopology::Pseudoknot,
        }
    }

    /// The target structure in dot-bracket form; empty when the content has none.
    pub fn secstruct(&self) -> &str {
        let secstruct = match self {
            TargetConditions::Single(t) | TargetConditions::Pseudoknot(t) => &t.secstruct,
            TargetConditions::Multistrand(t) => &t.secstruct,
            TargetConditions::Aptamer(t) => &t.secstruct,
            TargetConditions::AptamerOligo(t) => &t.secstruct,
            TargetConditions::Oligo(t) => &t.secstruct,
        };
        secstruct.as_deref().unwrap_or_default()
    }

    pub fn extra(&self) -> &Extra {
        match self {
            TargetConditions::Single(t) | TargetConditions::Pseudoknot(t) => &t.extra,
            TargetConditions::Multistrand(t) => &t.extra,
            TargetConditions::Aptamer(t) => &t.extra,
            TargetConditions::AptamerOligo(t) => &t.extra,
            TargetConditions::Oligo(t) => &t.extra,
        }
    }

    /// The raw `fold_mode` field, wherever the variant keeps it.
    pub fn fold_mode(&self) -> Option<NumericField> {
        let typed = match self {
            TargetConditions::Multistrand(t) => t.fold_mode.as_ref(),
            TargetConditions::AptamerOligo(t) => t.fold_mode.as_ref(),
            TargetConditions::Oligo(t) => t.fold_mode.as_ref(),
            _ => None,
        };
        typed.cloned().or_else(|| {
            self.extra()
                .get("fold_mode")
                .and_then(|v| serde_json::from_value(v.clone()).ok())
        })
    }

    /// Oligo attachment mode; a target without a `fold_mode` is a dimer.
    pub fn oligo_mode(&self) -> OligoMode {
        match self.fold_mode() {
            None => OligoMode::Dimer,
            Some(field) => match field.as_f64() {
                Some(code) if code.fract() == 0.0 => OligoMode::from_code(code as i64),
                _ => OligoMode::Unrecognized(-1),
            },
        }
    }

    pub fn oligo_name(&self) -> Option<&str> {
        match self {
            TargetConditions::Oligo(t) => t.oligo_name.as_deref(),
            TargetConditions::AptamerOligo(t) => t.oligo_name.as_deref(),
            _ => self.extra().get("oligo_name").and_then(Value::as_str),
        }
    }

    pub fn site(&self) -> Option<&[usize]> {
        match self {
            TargetConditions::Aptamer(t) => t.site.as_deref(),
            TargetConditions::AptamerOligo(t) => t.site.as_deref(),
            _ => None,
        }
    }

    pub fn binding_pairs(&self) -> Option<&[i32]> {
        match self {
            TargetConditions::Aptamer(t) => t.binding_pairs.as_deref(),
            TargetConditions::AptamerOligo(t) => t.binding_pairs.as_deref(),
            _ => None,
        }
    }

    pub fn bonus(&self) -> Option<f64> {
        let bonus = match self {
            TargetConditions::Aptamer(t) => t.bonus.as_ref(),
            TargetConditions::AptamerOligo(t) => t.bonus.as_ref(),
            _ => None,
        };
        bonus.and_then(Number::as_f64)
    }

    /// The ligand bonus on a 0..1 scale (content stores it as 0..100).
    pub fn bonus_fraction(&self) -> Option<f64> {
        self.bonus().map(|b| b / 100.0)
    }
}
