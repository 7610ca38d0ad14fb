use super::config::ProfilingConfig;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::undo_block::UndoBlock;
use crate::core::folding::Folder;
use crate::core::models::params::ParamKind;
use crate::core::models::plot::MeltCurve;
use crate::core::structure::pairs::{pair_iter, partner};
use tracing::{debug, info, instrument, trace};

/// Outcome of one thermal sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalProfile {
    pub melting_point: u32,
    pub curve: MeltCurve,
}

/// Extends a block's fold cache across the sweep temperatures and derives its melting
/// behaviour.
///
/// Folds and dot plots already present in the block are never requested again, so a
/// second sweep over the same block issues no folder calls at all.
#[derive(Debug, Clone, Default)]
pub struct ThermalProfiler {
    config: ProfilingConfig,
}

impl ThermalProfiler {
    pub fn new(config: ProfilingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfilingConfig {
        &self.config
    }

    #[instrument(skip_all, name = "thermal_sweep", fields(pseudoknots = pseudoknots))]
    pub fn run(
        &self,
        block: &mut UndoBlock,
        folder: &dyn Folder,
        pseudoknots: bool,
        reporter: &ProgressReporter,
    ) -> Result<ThermalProfile, EngineError> {
        let reference_temperature = self.config.reference_temperature;
        let reference = block
            .pairing(reference_temperature, pseudoknots)
            .ok_or(EngineError::MissingPairing {
                temperature: reference_temperature,
                pseudoknots,
            })?
            .to_vec();
        let sequence = block.sequence().to_vec();

        if cached_dot_plot(block, reference_temperature, pseudoknots).is_none() {
            debug!(temperature = reference_temperature, "Requesting reference dot plot.");
            let dot = folder
                .dot_plot(&sequence, &reference, reference_temperature, pseudoknots)?
                .ok_or(EngineError::DotPlotUnavailable {
                    temperature: reference_temperature,
                })?;
            block.set_parameter(ParamKind::DotPlot, dot, reference_temperature, pseudoknots)?;
        }
        block.dot_plot_data = cached_dot_plot(block, reference_temperature, pseudoknots);

        let temperatures: Vec<u32> = self.config.sweep.temperatures().collect();
        reporter.report(Progress::SweepStart {
            temperatures: temperatures.len() as u64,
        });

        let mut curve = MeltCurve::new();
        let mut scores = Vec::with_capacity(temperatures.len());

        for temperature in temperatures {
            let pairs = match block.pairing(temperature, pseudoknots) {
                Some(pairs) => {
                    trace!(temperature, "Pairing cache hit.");
                    pairs.to_vec()
                }
                None => {
                    debug!(temperature, folder = folder.name(), "Folding sequence.");
                    let pairs =
                        folder.fold_sequence(&sequence, None, None, pseudoknots, temperature)?;
                    block.set_pairing(&pairs, temperature, pseudoknots);
                    pairs
                }
            };

            let dot = match cached_dot_plot(block, temperature, pseudoknots) {
                Some(dot) => {
                    trace!(temperature, "Dot plot cache hit.");
                    dot
                }
                None => {
                    debug!(temperature, folder = folder.name(), "Requesting dot plot.");
                    let dot = folder
                        .dot_plot(&sequence, &pairs, temperature, pseudoknots)?
                        .ok_or(EngineError::DotPlotUnavailable { temperature })?;
                    block.set_parameter(ParamKind::DotPlot, dot.clone(), temperature, pseudoknots)?;
                    dot
                }
            };

            let cached_prob = block
                .parameters(temperature, pseudoknots)
                .and_then(|params| params.prob_score)
                .filter(|&score| score != 0.0);

            let prob = match cached_prob {
                // Previously scored temperatures plot the pair score, as stored records expect.
                Some(prob) => {
                    let cached_pair = block
                        .parameters(temperature, pseudoknots)
                        .and_then(|params| params.pair_score);
                    let pair = match cached_pair {
                        Some(pair) => pair,
                        None => {
                            let pair = pair_score(&pairs, &reference);
                            block.set_parameter(
                                ParamKind::PairScore,
                                pair,
                                temperature,
                                pseudoknots,
                            )?;
                            pair
                        }
                    };
                    trace!(temperature, prob, pair, "Using cached scores.");
                    curve.push(temperature, 1.0 - pair, 1.0);
                    prob
                }
                None => {
                    let prob = probability_score(&dot, &reference);
                    let pair = pair_score(&pairs, &reference);
                    block.set_parameter(ParamKind::ProbScore, prob, temperature, pseudoknots)?;
                    block.set_parameter(ParamKind::PairScore, pair, temperature, pseudoknots)?;
                    debug!(temperature, prob, pair, "Scored temperature.");
                    curve.push(temperature, 1.0 - prob, 1.0);
                    prob
                }
            };

            scores.push((temperature, prob));
            reporter.report(Progress::TemperatureDone { temperature });
        }
        reporter.report(Progress::SweepFinish);

        let melting_point = find_melting_point(
            &scores,
            self.config.melting.threshold,
            self.config.melting.unmelted_sentinel,
        );
        block.set_parameter(
            ParamKind::MeltingPoint,
            melting_point,
            reference_temperature,
            pseudoknots,
        )?;
        block.melt_curve = Some(curve.clone());

        info!(melting_point, "Thermal sweep complete.");
        Ok(ThermalProfile {
            melting_point,
            curve,
        })
    }
}

fn cached_dot_plot(block: &UndoBlock, temperature: u32, pseudoknots: bool) -> Option<Vec<f64>> {
    block
        .parameters(temperature, pseudoknots)
        .and_then(|params| params.dot_plot.clone())
}

/// Mean probability of the dot-plot entries that coincide with a reference pair.
///
/// `dot_plot` holds flat `(i, j, probability)` triples with 1-based positions; entries
/// are matched in either orientation. Returns 0 when nothing matches.
pub fn probability_score(dot_plot: &[f64], reference: &[i32]) -> f64 {
    let mut total = 0.0;
    let mut matches = 0usize;

    for triple in dot_plot.chunks_exact(3) {
        let (a, b) = (triple[0] as i64 - 1, triple[1] as i64 - 1);
        if a < 0 || b < 0 || a == b {
            continue;
        }
        let (i, j) = if a < b { (a, b) } else { (b, a) };
        if partner(reference, i as usize) == Some(j as usize) {
            total += triple[2];
            matches += 1;
        }
    }

    if matches > 0 { total / matches as f64 } else { 0.0 }
}

/// Fraction of positions paired in `pairs`, relative to the reference pairing length.
pub fn pair_score(pairs: &[i32], reference: &[i32]) -> f64 {
    if reference.is_empty() {
        return 0.0;
    }
    let paired = pair_iter(pairs).count() * 2;
    paired as f64 / reference.len() as f64
}

/// The first temperature after the baseline whose score falls below
/// `threshold * baseline`, or `sentinel` if none does.
///
/// `scores` is ordered by temperature and starts with the baseline.
pub fn find_melting_point(scores: &[(u32, f64)], threshold: f64, sentinel: u32) -> u32 {
    let Some((&(_, baseline), rest)) = scores.split_first() else {
        return sentinel;
    };
    rest.iter()
        .find(|&&(_, score)| score < baseline * threshold)
        .map_or(sentinel, |&(temperature, _)| temperature)
}
