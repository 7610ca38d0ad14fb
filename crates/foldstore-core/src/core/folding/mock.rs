use super::folder::{Folder, FolderError, StructureScore};
use crate::core::models::base::Base;
use crate::core::structure::pairs::{pair_iter, unpaired};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderCall {
    Fold { temperature: u32, pseudoknots: bool },
    Score { temperature: u32, pseudoknots: bool },
    DotPlot { temperature: u32, pseudoknots: bool },
}

/// A deterministic folder that records every request it receives.
///
/// Folds return the configured pairing for a temperature (unpaired otherwise); dot plots
/// list every pair of the requested pairing with probability 0.9 unless overridden.
#[derive(Debug, Default)]
pub struct RecordingFolder {
    folds: HashMap<u32, Vec<i32>>,
    dot_plots: HashMap<u32, Vec<f64>>,
    dot_plots_unsupported: bool,
    failing: bool,
    calls: RefCell<Vec<FolderCall>>,
    scored_sequences: RefCell<Vec<Vec<Base>>>,
}

impl RecordingFolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fold(mut self, temperature: u32, pairs: Vec<i32>) -> Self {
        self.folds.insert(temperature, pairs);
        self
    }

    pub fn with_dot_plot(mut self, temperature: u32, triples: Vec<f64>) -> Self {
        self.dot_plots.insert(temperature, triples);
        self
    }

    pub fn without_dot_plots(mut self) -> Self {
        self.dot_plots_unsupported = true;
        self
    }

    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn calls(&self) -> Vec<FolderCall> {
        self.calls.borrow().clone()
    }

    pub fn fold_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, FolderCall::Fold { .. }))
            .count()
    }

    pub fn dot_plot_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, FolderCall::DotPlot { .. }))
            .count()
    }

    pub fn last_scored_sequence(&self) -> Option<Vec<Base>> {
        self.scored_sequences.borrow().last().cloned()
    }

    fn check(&self) -> Result<(), FolderError> {
        if self.failing {
            return Err(FolderError::Engine {
                folder: self.name().to_string(),
                message: "engine crashed".to_string(),
            });
        }
        Ok(())
    }
}

impl Folder for RecordingFolder {
    fn name(&self) -> &str {
        "recording"
    }

    fn fold_sequence(
        &self,
        sequence: &[Base],
        _constraint_pairs: Option<&[i32]>,
        _constraint: Option<&str>,
        pseudoknots: bool,
        temperature: u32,
    ) -> Result<Vec<i32>, FolderError> {
        self.calls.borrow_mut().push(FolderCall::Fold {
            temperature,
            pseudoknots,
        });
        self.check()?;
        Ok(self
            .folds
            .get(&temperature)
            .cloned()
            .unwrap_or_else(|| unpaired(sequence.len())))
    }

    fn score_structures(
        &self,
        full_sequence: &[Base],
        pairs: &[i32],
        pseudoknots: bool,
        temperature: u32,
    ) -> Result<StructureScore, FolderError> {
        self.calls.borrow_mut().push(FolderCall::Score {
            temperature,
            pseudoknots,
        });
        self.check()?;
        self.scored_sequences
            .borrow_mut()
            .push(full_sequence.to_vec());
        let mut nnfe = vec![0.0; full_sequence.len()];
        for (i, _) in pair_iter(pairs) {
            if let Some(slot) = nnfe.get_mut(i) {
                *slot = -1.5;
            }
        }
        Ok(StructureScore {
            free_energy: nnfe.iter().sum(),
            nnfe,
        })
    }

    fn dot_plot(
        &self,
        _sequence: &[Base],
        pairs: &[i32],
        temperature: u32,
        pseudoknots: bool,
    ) -> Result<Option<Vec<f64>>, FolderError> {
        self.calls.borrow_mut().push(FolderCall::DotPlot {
            temperature,
            pseudoknots,
        });
        self.check()?;
        if self.dot_plots_unsupported {
            return Ok(None);
        }
        if let Some(triples) = self.dot_plots.get(&temperature) {
            return Ok(Some(triples.clone()));
        }
        Ok(Some(
            pair_iter(pairs)
                .flat_map(|(i, j)| [(i + 1) as f64, (j + 1) as f64, 0.9])
                .collect(),
        ))
    }
}
