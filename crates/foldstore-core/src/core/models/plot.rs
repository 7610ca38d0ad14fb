use serde::Serialize;

/// One entry of a dot plot. Positions are 1-based, as produced by folding engines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DotPlotPoint {
    pub i: usize,
    pub j: usize,
    pub probability: f64,
}

/// Base-pair probabilities of the reference fold, ready for a scatter plot.
#[derive(Debug, Clone, PartialEq)]
pub struct DotPlotData {
    triples: Vec<f64>,
    sequence_length: usize,
}

impl DotPlotData {
    pub fn new(triples: Vec<f64>, sequence_length: usize) -> Self {
        Self {
            triples,
            sequence_length,
        }
    }

    pub fn triples(&self) -> &[f64] {
        &self.triples
    }

    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    /// Decoded entries; a trailing partial triple is ignored.
    pub fn points(&self) -> impl Iterator<Item = DotPlotPoint> + '_ {
        self.triples.chunks_exact(3).map(|t| DotPlotPoint {
            i: t[0] as usize,
            j: t[1] as usize,
            probability: t[2],
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeltPoint {
    pub temperature: u32,
    pub degradation: f64,
    pub max: f64,
}

/// Structural degradation against temperature, one point per sweep step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeltCurve {
    points: Vec<MeltPoint>,
}

impl MeltCurve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, temperature: u32, degradation: f64, max: f64) {
        self.points.push(MeltPoint {
            temperature,
            degradation,
            max,
        });
    }

    pub fn points(&self) -> &[MeltPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn degradation(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.degradation).collect()
    }

    pub fn maxima(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.max).collect()
    }
}
