use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// The closed set of per-fold metrics.
///
/// Discriminants are the slot indices used by the persisted parameter arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParamKind {
    GuPairs = 0,
    GcPairs = 1,
    AuPairs = 2,
    Mfe = 3,
    Repetition = 4,
    LongestStack = 5,
    FreeEnergy = 6,
    DotPlot = 7,
    DotPlotBitmap = 8,
    MeltPlotBitmap = 9,
    ProbScore = 10,
    MeltingPoint = 11,
    PairScore = 12,
    NnfeArray = 13,
    Max = 14,
    AnyPairs = 15,
}

impl ParamKind {
    pub const ALL: [ParamKind; 16] = [
        ParamKind::GuPairs,
        ParamKind::GcPairs,
        ParamKind::AuPairs,
        ParamKind::Mfe,
        ParamKind::Repetition,
        ParamKind::LongestStack,
        ParamKind::FreeEnergy,
        ParamKind::DotPlot,
        ParamKind::DotPlotBitmap,
        ParamKind::MeltPlotBitmap,
        ParamKind::ProbScore,
        ParamKind::MeltingPoint,
        ParamKind::PairScore,
        ParamKind::NnfeArray,
        ParamKind::Max,
        ParamKind::AnyPairs,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            ParamKind::GuPairs => "GU",
            ParamKind::GcPairs => "GC",
            ParamKind::AuPairs => "AU",
            ParamKind::Mfe => "MFE",
            ParamKind::Repetition => "REPETITION",
            ParamKind::LongestStack => "STACK",
            ParamKind::FreeEnergy => "FE",
            ParamKind::DotPlot => "DOTPLOT",
            ParamKind::DotPlotBitmap => "DOTPLOT_BITMAP",
            ParamKind::MeltPlotBitmap => "MELTPLOT_BITMAP",
            ParamKind::ProbScore => "PROB_SCORE",
            ParamKind::MeltingPoint => "MELTING_POINT",
            ParamKind::PairScore => "PAIR_SCORE",
            ParamKind::NnfeArray => "NNFE_ARRAY",
            ParamKind::Max => "MAX",
            ParamKind::AnyPairs => "ANY_PAIR",
        }
    }
}

/// A dynamically-shaped parameter value, as found in persisted slot arrays.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(f64),
    Array(Vec<f64>),
}

impl ParamValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            ParamValue::Scalar(v) => Some(*v),
            ParamValue::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&[f64]> {
        match self {
            ParamValue::Array(values) => Some(values),
            ParamValue::Scalar(_) => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Scalar(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Scalar(f64::from(value))
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(values: Vec<f64>) -> Self {
        ParamValue::Array(values)
    }
}

// Integral values are written as JSON integers so legacy readers see `12`, not `12.0`.
fn serialize_number<S: Serializer>(value: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        serializer.serialize_i64(value as i64)
    } else {
        serializer.serialize_f64(value)
    }
}

struct Number(f64);

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_number(self.0, serializer)
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Scalar(v) => serialize_number(*v, serializer),
            ParamValue::Array(values) => {
                serializer.collect_seq(values.iter().map(|v| Number(*v)))
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ParamError {
    #[error("Parameter {kind} expects {expected}, got {found}")]
    Shape {
        kind: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("Parameter {kind} expects a non-negative integer, got {value}")]
    NotACount { kind: &'static str, value: f64 },
    #[error("Unknown parameter slot index: {0}")]
    UnknownSlot(usize),
}

/// Every metric cached for one `(temperature, pseudoknots)` fold.
///
/// All fields start absent; a field is `Some` only after it has been computed or restored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<Option<ParamValue>>",
    into = "Vec<Option<ParamValue>>"
)]
pub struct FoldParameters {
    pub gu_pairs: Option<u32>,
    pub gc_pairs: Option<u32>,
    pub au_pairs: Option<u32>,
    pub mfe: Option<f64>,
    pub repetition: Option<u32>,
    pub longest_stack: Option<u32>,
    pub free_energy: Option<f64>,
    pub dot_plot: Option<Vec<f64>>,
    pub dot_plot_bitmap: Option<ParamValue>,
    pub melt_plot_bitmap: Option<ParamValue>,
    pub prob_score: Option<f64>,
    pub melting_point: Option<u32>,
    pub pair_score: Option<f64>,
    pub nnfe: Option<Vec<f64>>,
    pub max: Option<ParamValue>,
    pub any_pairs: Option<u32>,
}

impl FoldParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        ParamKind::ALL.iter().all(|&kind| self.get(kind).is_none())
    }

    pub fn get(&self, kind: ParamKind) -> Option<ParamValue> {
        match kind {
            ParamKind::GuPairs => self.gu_pairs.map(ParamValue::from),
            ParamKind::GcPairs => self.gc_pairs.map(ParamValue::from),
            ParamKind::AuPairs => self.au_pairs.map(ParamValue::from),
            ParamKind::Mfe => self.mfe.map(ParamValue::from),
            ParamKind::Repetition => self.repetition.map(ParamValue::from),
            ParamKind::LongestStack => self.longest_stack.map(ParamValue::from),
            ParamKind::FreeEnergy => self.free_energy.map(ParamValue::from),
            ParamKind::DotPlot => self.dot_plot.clone().map(ParamValue::from),
            ParamKind::DotPlotBitmap => self.dot_plot_bitmap.clone(),
            ParamKind::MeltPlotBitmap => self.melt_plot_bitmap.clone(),
            ParamKind::ProbScore => self.prob_score.map(ParamValue::from),
            ParamKind::MeltingPoint => self.melting_point.map(ParamValue::from),
            ParamKind::PairScore => self.pair_score.map(ParamValue::from),
            ParamKind::NnfeArray => self.nnfe.clone().map(ParamValue::from),
            ParamKind::Max => self.max.clone(),
            ParamKind::AnyPairs => self.any_pairs.map(ParamValue::from),
        }
    }

    /// Writes one slot, checking that the value has the shape the slot holds.
    pub fn set(&mut self, kind: ParamKind, value: impl Into<ParamValue>) -> Result<(), ParamError> {
        let value = value.into();
        match kind {
            ParamKind::GuPairs => self.gu_pairs = Some(count(kind, &value)?),
            ParamKind::GcPairs => self.gc_pairs = Some(count(kind, &value)?),
            ParamKind::AuPairs => self.au_pairs = Some(count(kind, &value)?),
            ParamKind::Mfe => self.mfe = Some(scalar(kind, &value)?),
            ParamKind::Repetition => self.repetition = Some(count(kind, &value)?),
            ParamKind::LongestStack => self.longest_stack = Some(count(kind, &value)?),
            ParamKind::FreeEnergy => self.free_energy = Some(scalar(kind, &value)?),
            ParamKind::DotPlot => self.dot_plot = Some(array(kind, value)?),
            ParamKind::DotPlotBitmap => self.dot_plot_bitmap = Some(value),
            ParamKind::MeltPlotBitmap => self.melt_plot_bitmap = Some(value),
            ParamKind::ProbScore => self.prob_score = Some(scalar(kind, &value)?),
            ParamKind::MeltingPoint => self.melting_point = Some(count(kind, &value)?),
            ParamKind::PairScore => self.pair_score = Some(scalar(kind, &value)?),
            ParamKind::NnfeArray => self.nnfe = Some(array(kind, value)?),
            ParamKind::Max => self.max = Some(value),
            ParamKind::AnyPairs => self.any_pairs = Some(count(kind, &value)?),
        }
        Ok(())
    }

    /// Kinds that currently hold a value, in slot order.
    pub fn present_kinds(&self) -> Vec<ParamKind> {
        ParamKind::ALL
            .iter()
            .copied()
            .filter(|&kind| self.get(kind).is_some())
            .collect()
    }
}

fn shape_name(value: &ParamValue) -> &'static str {
    match value {
        ParamValue::Scalar(_) => "a scalar",
        ParamValue::Array(_) => "an array",
    }
}

fn scalar(kind: ParamKind, value: &ParamValue) -> Result<f64, ParamError> {
    value.as_scalar().ok_or(ParamError::Shape {
        kind: kind.name(),
        expected: "a scalar",
        found: shape_name(value),
    })
}

fn count(kind: ParamKind, value: &ParamValue) -> Result<u32, ParamError> {
    let v = scalar(kind, value)?;
    if v.fract() != 0.0 || v < 0.0 || v > f64::from(u32::MAX) {
        return Err(ParamError::NotACount {
            kind: kind.name(),
            value: v,
        });
    }
    Ok(v as u32)
}

fn array(kind: ParamKind, value: ParamValue) -> Result<Vec<f64>, ParamError> {
    match value {
        ParamValue::Array(values) => Ok(values),
        ParamValue::Scalar(_) => Err(ParamError::Shape {
            kind: kind.name(),
            expected: "an array",
            found: "a scalar",
        }),
    }
}

impl TryFrom<Vec<Option<ParamValue>>> for FoldParameters {
    type Error = ParamError;

    fn try_from(slots: Vec<Option<ParamValue>>) -> Result<Self, Self::Error> {
        let mut params = FoldParameters::default();
        for (index, slot) in slots.into_iter().enumerate() {
            let Some(value) = slot else { continue };
            let kind = ParamKind::from_index(index).ok_or(ParamError::UnknownSlot(index))?;
            params.set(kind, value)?;
        }
        Ok(params)
    }
}

impl From<FoldParameters> for Vec<Option<ParamValue>> {
    fn from(params: FoldParameters) -> Self {
        let mut slots: Vec<Option<ParamValue>> =
            ParamKind::ALL.iter().map(|&kind| params.get(kind)).collect();
        while matches!(slots.last(), Some(None)) {
            slots.pop();
        }
        slots
    }
}
