use super::cache::{FoldCondition, FoldTable, REFERENCE_TEMPERATURE};
use super::error::EngineError;
use super::progress::ProgressReporter;
use super::thermal::ThermalProfiler;
use crate::core::folding::Folder;
use crate::core::models::base::{Base, sequence_to_string};
use crate::core::models::oligo::{Oligo, OligoMode};
use crate::core::models::params::{FoldParameters, ParamKind, ParamValue};
use crate::core::models::plot::{DotPlotData, MeltCurve};
use crate::core::models::target::TargetConditions;
use tracing::{debug, instrument};

const DEFAULT_REPETITION_MOTIF: usize = 5;

/// Cached fold results and derived statistics for one design state.
///
/// An `UndoBlock` is created for each evaluated edit. Pairings come first, then the
/// basic metrics, then the thermal sweep on demand. Every setter copies its input, so
/// callers never share mutable state with a block.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoBlock {
    pub(crate) sequence: Vec<Base>,
    pub(crate) folds: FoldTable,
    pub(crate) stable: bool,
    pub(crate) target_oligo: Option<Vec<Base>>,
    pub(crate) target_oligos: Option<Vec<Oligo>>,
    pub(crate) oligo_order: Option<Vec<usize>>,
    pub(crate) oligos_paired: usize,
    pub(crate) target_pairs: Vec<i32>,
    pub(crate) target_oligo_order: Option<Vec<usize>>,
    pub(crate) puzzle_locks: Option<Vec<bool>>,
    pub(crate) forced_struct: Vec<i32>,
    pub(crate) target_conditions: Option<TargetConditions>,

    // Plot buffers filled by the thermal sweep; never persisted.
    pub(crate) dot_plot_data: Option<Vec<f64>>,
    pub(crate) melt_curve: Option<MeltCurve>,
}

impl UndoBlock {
    pub fn new(sequence: &[Base]) -> Self {
        Self {
            sequence: sequence.to_vec(),
            folds: FoldTable::new(),
            stable: false,
            target_oligo: None,
            target_oligos: None,
            oligo_order: None,
            oligos_paired: 0,
            target_pairs: Vec::new(),
            target_oligo_order: None,
            puzzle_locks: Some(Vec::new()),
            forced_struct: Vec::new(),
            target_conditions: None,
            dot_plot_data: None,
            melt_curve: None,
        }
    }

    // --- Fold cells ---

    pub fn pairing(&self, temperature: u32, pseudoknots: bool) -> Option<&[i32]> {
        self.folds
            .pairing(FoldCondition::new(temperature, pseudoknots))
    }

    pub fn reference_pairing(&self) -> Option<&[i32]> {
        self.pairing(REFERENCE_TEMPERATURE, false)
    }

    pub fn set_pairing(&mut self, pairing: &[i32], temperature: u32, pseudoknots: bool) {
        self.folds.set_pairing(
            FoldCondition::new(temperature, pseudoknots),
            pairing.to_vec(),
        );
    }

    pub fn parameters(&self, temperature: u32, pseudoknots: bool) -> Option<&FoldParameters> {
        self.folds
            .parameters(FoldCondition::new(temperature, pseudoknots))
    }

    pub fn parameters_mut(&mut self, temperature: u32, pseudoknots: bool) -> &mut FoldParameters {
        self.folds
            .parameters_mut(FoldCondition::new(temperature, pseudoknots))
    }

    /// Returns `None` both when the temperature row was never written and when the
    /// slot itself is empty.
    pub fn parameter(
        &self,
        kind: ParamKind,
        temperature: u32,
        pseudoknots: bool,
    ) -> Option<ParamValue> {
        self.parameters(temperature, pseudoknots)
            .and_then(|params| params.get(kind))
    }

    pub fn set_parameter(
        &mut self,
        kind: ParamKind,
        value: impl Into<ParamValue>,
        temperature: u32,
        pseudoknots: bool,
    ) -> Result<(), EngineError> {
        self.parameters_mut(temperature, pseudoknots)
            .set(kind, value)?;
        Ok(())
    }

    pub fn folds(&self) -> &FoldTable {
        &self.folds
    }

    // --- Derived metrics ---

    /// Computes pair-type counts, stack length, repetition and free energy for the
    /// cached pairing at `(temperature, pseudoknots)`.
    pub fn compute_basics(
        &mut self,
        folder: &dyn Folder,
        temperature: u32,
        pseudoknots: bool,
    ) -> Result<(), EngineError> {
        self.compute_basics_with_motif(folder, temperature, pseudoknots, DEFAULT_REPETITION_MOTIF)
    }

    #[instrument(skip_all, name = "compute_basics", fields(temperature = temperature, pseudoknots = pseudoknots))]
    pub fn compute_basics_with_motif(
        &mut self,
        folder: &dyn Folder,
        temperature: u32,
        pseudoknots: bool,
        repetition_motif_length: usize,
    ) -> Result<(), EngineError> {
        let pairs = self
            .pairing(temperature, pseudoknots)
            .ok_or(EngineError::MissingPairing {
                temperature,
                pseudoknots,
            })?
            .to_vec();
        let seq = &self.sequence;

        let gu = folder.count_gu_pairs(seq, &pairs);
        let gc = folder.count_gc_pairs(seq, &pairs);
        let au = folder.count_au_pairs(seq, &pairs);
        let any = folder.count_pairs(&pairs);
        let stack = folder.longest_stack(&pairs);
        let repetition =
            folder.sequence_repetition(&sequence_to_string(seq), repetition_motif_length);

        let full_sequence = self.full_sequence()?;
        debug!(
            folder = folder.name(),
            length = full_sequence.len(),
            "Scoring structure."
        );
        let score = folder.score_structures(&full_sequence, &pairs, pseudoknots, temperature)?;

        let params = self.parameters_mut(temperature, pseudoknots);
        params.gu_pairs = Some(gu);
        params.gc_pairs = Some(gc);
        params.au_pairs = Some(au);
        params.any_pairs = Some(any);
        params.longest_stack = Some(stack);
        params.repetition = Some(repetition);
        params.free_energy = Some(score.free_energy);
        params.nnfe = Some(score.nnfe);

        debug!(
            gu,
            gc,
            au,
            any,
            stack,
            repetition,
            free_energy = score.free_energy,
            "Basic metrics stored."
        );
        Ok(())
    }

    /// The primary sequence joined with its bound oligo(s), as handed to the scorer.
    ///
    /// A single target oligo follows a cut in dimer mode, is appended directly in 3'
    /// extension mode and prepended in 5' extension mode. Multiple oligos follow in
    /// `oligo_order`, each preceded by a cut.
    pub fn full_sequence(&self) -> Result<Vec<Base>, EngineError> {
        let mut full = self.sequence.clone();

        if let Some(oligo) = &self.target_oligo {
            match self.oligo_mode() {
                OligoMode::Ext5p => {
                    let mut prefixed = oligo.clone();
                    prefixed.append(&mut full);
                    full = prefixed;
                }
                OligoMode::Dimer => {
                    full.push(Base::Cut);
                    full.extend_from_slice(oligo);
                }
                _ => full.extend_from_slice(oligo),
            }
        } else if let Some(oligos) = &self.target_oligos {
            let order = self
                .oligo_order
                .as_deref()
                .ok_or(EngineError::MissingOligoOrder)?;
            for position in 0..oligos.len() {
                let oligo = order
                    .get(position)
                    .and_then(|&index| oligos.get(index))
                    .ok_or_else(|| EngineError::InvalidOligoOrder {
                        order: order.to_vec(),
                        count: oligos.len(),
                    })?;
                full.push(Base::Cut);
                full.extend_from_slice(&oligo.sequence);
            }
        }
        Ok(full)
    }

    // --- Plot data ---

    /// The reference dot plot mirrored by the last thermal sweep.
    pub fn dot_plot(&self) -> Option<DotPlotData> {
        self.dot_plot_data
            .as_ref()
            .map(|triples| DotPlotData::new(triples.clone(), self.sequence.len()))
    }

    /// The degradation curve recorded by the last thermal sweep.
    pub fn melt_curve(&self) -> Option<&MeltCurve> {
        self.melt_curve.as_ref()
    }

    /// Runs the standard 37–97°C sweep and returns the melting point.
    ///
    /// See [`ThermalProfiler`] for configurable sweeps and progress reporting.
    pub fn update_melting_point_and_dot_plot(
        &mut self,
        folder: &dyn Folder,
        pseudoknots: bool,
    ) -> Result<u32, EngineError> {
        ThermalProfiler::default()
            .run(self, folder, pseudoknots, &ProgressReporter::new())
            .map(|profile| profile.melting_point)
    }

    // --- Auxiliary fields ---

    pub fn sequence(&self) -> &[Base] {
        &self.sequence
    }

    pub fn set_sequence(&mut self, sequence: &[Base]) {
        self.sequence = sequence.to_vec();
    }

    pub fn stable(&self) -> bool {
        self.stable
    }

    pub fn set_stable(&mut self, stable: bool) {
        self.stable = stable;
    }

    pub fn target_oligo(&self) -> Option<&[Base]> {
        self.target_oligo.as_deref()
    }

    pub fn set_target_oligo(&mut self, oligo: Option<&[Base]>) {
        self.target_oligo = oligo.map(<[Base]>::to_vec);
    }

    pub fn target_oligos(&self) -> Option<&[Oligo]> {
        self.target_oligos.as_deref()
    }

    pub fn set_target_oligos(&mut self, oligos: Option<&[Oligo]>) {
        self.target_oligos = oligos.map(<[Oligo]>::to_vec);
    }

    pub fn oligo_order(&self) -> Option<&[usize]> {
        self.oligo_order.as_deref()
    }

    pub fn set_oligo_order(&mut self, order: Option<&[usize]>) {
        self.oligo_order = order.map(<[usize]>::to_vec);
    }

    pub fn oligos_paired(&self) -> usize {
        self.oligos_paired
    }

    pub fn set_oligos_paired(&mut self, count: usize) {
        self.oligos_paired = count;
    }

    pub fn target_pairs(&self) -> &[i32] {
        &self.target_pairs
    }

    pub fn set_target_pairs(&mut self, pairs: &[i32]) {
        self.target_pairs = pairs.to_vec();
    }

    pub fn target_oligo_order(&self) -> Option<&[usize]> {
        self.target_oligo_order.as_deref()
    }

    pub fn set_target_oligo_order(&mut self, order: Option<&[usize]>) {
        self.target_oligo_order = order.map(<[usize]>::to_vec);
    }

    pub fn puzzle_locks(&self) -> Option<&[bool]> {
        self.puzzle_locks.as_deref()
    }

    pub fn set_puzzle_locks(&mut self, locks: Option<&[bool]>) {
        self.puzzle_locks = locks.map(<[bool]>::to_vec);
    }

    pub fn forced_struct(&self) -> &[i32] {
        &self.forced_struct
    }

    pub fn set_forced_struct(&mut self, forced: &[i32]) {
        self.forced_struct = forced.to_vec();
    }

    pub fn target_conditions(&self) -> Option<&TargetConditions> {
        self.target_conditions.as_ref()
    }

    pub fn set_target_conditions(&mut self, conditions: Option<&TargetConditions>) {
        self.target_conditions = conditions.cloned();
    }

    /// [`OligoMode::None`] without target conditions, otherwise the conditions' mode.
    pub fn oligo_mode(&self) -> OligoMode {
        self.target_conditions
            .as_ref()
            .map_or(OligoMode::None, TargetConditions::oligo_mode)
    }

    pub fn oligo_name(&self) -> Option<&str> {
        self.target_conditions
            .as_ref()
            .and_then(TargetConditions::oligo_name)
    }
}
