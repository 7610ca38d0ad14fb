use crate::core::folding::Folder;
use crate::core::models::base::Base;
use crate::core::models::oligo::Oligo;
use crate::core::models::target::TargetConditions;
use crate::engine::config::ProfilingConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::thermal::ThermalProfiler;
use crate::engine::undo_block::UndoBlock;
use tracing::{debug, info, instrument};

/// One design state to evaluate.
#[derive(Debug, Clone, Default)]
pub struct EvaluationRequest {
    pub sequence: Vec<Base>,
    /// Reference pairing, if the caller already folded the sequence.
    pub pairing: Option<Vec<i32>>,
    pub pseudoknots: bool,
    pub target_oligo: Option<Vec<Base>>,
    pub target_oligos: Option<Vec<Oligo>>,
    pub oligo_order: Option<Vec<usize>>,
    pub target_conditions: Option<TargetConditions>,
    /// Also run the thermal sweep.
    pub thermal: bool,
}

#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub block: UndoBlock,
    pub melting_point: Option<u32>,
}

#[instrument(skip_all, name = "evaluate_workflow")]
pub fn run(
    request: &EvaluationRequest,
    folder: &dyn Folder,
    config: &ProfilingConfig,
    reporter: &ProgressReporter,
) -> Result<EvaluationResult, EngineError> {
    // === Phase 1: Prepare the block ===
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    let reference_temperature = config.reference_temperature;
    let pseudoknots = request.pseudoknots;

    let mut block = UndoBlock::new(&request.sequence);
    block.set_target_oligo(request.target_oligo.as_deref());
    block.set_target_oligos(request.target_oligos.as_deref());
    block.set_oligo_order(request.oligo_order.as_deref());
    block.set_target_conditions(request.target_conditions.as_ref());
    info!(
        length = request.sequence.len(),
        folder = folder.name(),
        "Evaluating design."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Reference fold ===
    reporter.report(Progress::PhaseStart {
        name: "Reference fold",
    });
    let pairing = match &request.pairing {
        Some(pairing) => pairing.clone(),
        None => {
            debug!(temperature = reference_temperature, "Folding reference structure.");
            folder.fold_sequence(
                &request.sequence,
                None,
                None,
                pseudoknots,
                reference_temperature,
            )?
        }
    };
    block.set_pairing(&pairing, reference_temperature, pseudoknots);
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Basic metrics ===
    reporter.report(Progress::PhaseStart {
        name: "Basic metrics",
    });
    block.compute_basics_with_motif(
        folder,
        reference_temperature,
        pseudoknots,
        config.repetition_motif_length,
    )?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 4: Thermal sweep (optional) ===
    let melting_point = if request.thermal {
        reporter.report(Progress::PhaseStart {
            name: "Thermal sweep",
        });
        let profile = ThermalProfiler::new(config.clone()).run(
            &mut block,
            folder,
            pseudoknots,
            reporter,
        )?;
        reporter.report(Progress::PhaseFinish);
        Some(profile.melting_point)
    } else {
        None
    };

    info!(?melting_point, "Evaluation complete.");
    Ok(EvaluationResult {
        block,
        melting_point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::folding::mock::{FolderCall, RecordingFolder};
    use crate::core::models::base::parse_sequence;
    use crate::core::structure::pairs::from_dot_bracket;
    use std::sync::Mutex;

    fn hairpin_request() -> EvaluationRequest {
        EvaluationRequest {
            sequence: parse_sequence("GGGGAAAACCCC").unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn folds_reference_when_pairing_is_absent() {
        let hairpin = from_dot_bracket("((((....))))").unwrap();
        let folder = RecordingFolder::new().with_fold(37, hairpin.clone());

        let result = run(
            &hairpin_request(),
            &folder,
            &ProfilingConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(result.block.reference_pairing(), Some(&hairpin[..]));
        assert_eq!(result.block.parameters(37, false).unwrap().gc_pairs, Some(4));
        assert_eq!(result.melting_point, None);
        assert_eq!(
            folder.calls(),
            vec![
                FolderCall::Fold {
                    temperature: 37,
                    pseudoknots: false
                },
                FolderCall::Score {
                    temperature: 37,
                    pseudoknots: false
                },
            ]
        );
    }

    #[test]
    fn supplied_pairing_skips_the_reference_fold() {
        let request = EvaluationRequest {
            pairing: Some(from_dot_bracket("((......))..").unwrap()),
            ..hairpin_request()
        };
        let folder = RecordingFolder::new();

        let result = run(
            &request,
            &folder,
            &ProfilingConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(folder.fold_calls(), 0);
        assert_eq!(result.block.parameters(37, false).unwrap().any_pairs, Some(2));
    }

    #[test]
    fn thermal_request_reports_melting_point_and_phases() {
        let request = EvaluationRequest {
            pairing: Some(from_dot_bracket("((((....))))").unwrap()),
            thermal: true,
            ..hairpin_request()
        };
        let folder = RecordingFolder::new();
        let phases = Mutex::new(Vec::new());
        let result = {
            let reporter = ProgressReporter::with_callback(Box::new(|event| {
                if let Progress::PhaseStart { name } = event {
                    phases.lock().unwrap().push(name);
                }
            }));
            run(&request, &folder, &ProfilingConfig::default(), &reporter).unwrap()
        };

        assert_eq!(result.melting_point, Some(47));
        assert_eq!(
            result.block.parameters(37, false).unwrap().melting_point,
            Some(47)
        );
        assert_eq!(
            phases.into_inner().unwrap(),
            vec!["Preparation", "Reference fold", "Basic metrics", "Thermal sweep"]
        );
    }

    #[test]
    fn oligo_context_is_copied_into_the_block() {
        let oligo = parse_sequence("UUU").unwrap();
        let request = EvaluationRequest {
            target_oligo: Some(oligo.clone()),
            ..hairpin_request()
        };
        let folder = RecordingFolder::new();

        let result = run(
            &request,
            &folder,
            &ProfilingConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(result.block.target_oligo(), Some(&oligo[..]));
        // Without target conditions the oligo is appended directly.
        assert_eq!(folder.last_scored_sequence().unwrap().len(), 15);
    }

    #[test]
    fn folder_failure_aborts_the_workflow() {
        let folder = RecordingFolder::new().failing();
        let result = run(
            &hairpin_request(),
            &folder,
            &ProfilingConfig::default(),
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(EngineError::Folder { .. })));
    }
}
