use super::load_record;
use crate::cli::MeltArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use foldstore::core::folding::CacheOnlyFolder;
use foldstore::core::io::curves::{write_dot_plot_to_path, write_melt_curve_to_path};
use foldstore::engine::progress::{Progress, ProgressReporter};
use foldstore::engine::thermal::{ThermalProfile, ThermalProfiler};
use foldstore::engine::undo_block::UndoBlock;
use std::fmt::Write;
use tracing::{info, warn};

pub fn run(args: MeltArgs) -> Result<()> {
    info!("Merging profiling configuration from file and CLI arguments...");
    let config = PartialConfig::load(args.config.as_deref())?.merge_with_cli(&args.set_values)?;
    let unmelted = config.melting.unmelted_sentinel;

    let mut block = load_record(&args.record)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let profile = profile_block(&mut block, ThermalProfiler::new(config), args.pseudoknots, &reporter)?;

    print!("{}", render_profile(&profile, unmelted));

    if let Some(path) = &args.csv {
        write_melt_curve_to_path(&profile.curve, path)?;
        println!("Melt curve written to: {}", path.display());
    }

    if let Some(path) = &args.dot_plot {
        match block.dot_plot() {
            Some(data) => {
                write_dot_plot_to_path(&data, path)?;
                println!("Dot plot written to: {}", path.display());
            }
            None => warn!("Record has no reference dot plot; skipping {:?}", path),
        }
    }

    if let Some(path) = &args.output {
        let json = block.to_json_pretty()?;
        std::fs::write(path, json)?;
        println!("Updated record written to: {}", path.display());
    }
    Ok(())
}

/// Profiles `block` from its cached folds only; a missing fold is reported, never computed.
pub fn profile_block(
    block: &mut UndoBlock,
    profiler: ThermalProfiler,
    pseudoknots: bool,
    reporter: &ProgressReporter,
) -> Result<ThermalProfile> {
    reporter.report(Progress::PhaseStart {
        name: "Thermal sweep",
    });
    let profile = profiler.run(block, &CacheOnlyFolder, pseudoknots, reporter)?;
    reporter.report(Progress::PhaseFinish);
    Ok(profile)
}

pub fn render_profile(profile: &ThermalProfile, unmelted_sentinel: u32) -> String {
    let mut out = String::new();
    if profile.melting_point >= unmelted_sentinel {
        let _ = writeln!(out, "Melting point: not reached within the sweep");
    } else {
        let _ = writeln!(out, "Melting point: {}°C", profile.melting_point);
    }
    let _ = writeln!(out, "{:>6}  {:>11}", "T (°C)", "degradation");
    for point in profile.curve.points() {
        let _ = writeln!(out, "{:>6}  {:>11.3}", point.temperature, point.degradation);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{swept_hairpin, write_record};
    use foldstore::engine::config::ProfilingConfig;
    use crate::error::CliError;
    use foldstore::engine::error::EngineError;
    use tempfile::tempdir;

    fn melt_args(record: std::path::PathBuf) -> MeltArgs {
        MeltArgs {
            record,
            pseudoknots: false,
            output: None,
            csv: None,
            dot_plot: None,
            config: None,
            set_values: vec![],
        }
    }

    #[test]
    fn cached_record_profiles_without_folding() {
        let mut block = swept_hairpin();
        let profile = profile_block(
            &mut block,
            ThermalProfiler::default(),
            false,
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(profile.melting_point, 67);
        assert_eq!(profile.curve.len(), 7);
    }

    #[test]
    fn missing_fold_is_reported_not_computed() {
        let mut block = swept_hairpin();
        let result = profile_block(&mut block, ThermalProfiler::default(), true, &ProgressReporter::new());
        assert!(matches!(
            result,
            Err(CliError::FoldStore(EngineError::MissingPairing {
                pseudoknots: true,
                ..
            }))
        ));
    }

    #[test]
    fn render_marks_unmelted_records() {
        let mut block = swept_hairpin();
        let mut profile = profile_block(
            &mut block,
            ThermalProfiler::default(),
            false,
            &ProgressReporter::new(),
        )
        .unwrap();
        assert!(render_profile(&profile, 107).starts_with("Melting point: 67°C"));

        profile.melting_point = ProfilingConfig::default().melting.unmelted_sentinel;
        let text = render_profile(&profile, 107);
        assert!(text.starts_with("Melting point: not reached within the sweep"));
        assert_eq!(text.lines().count(), 9);
    }

    #[test]
    fn run_writes_record_and_curve() {
        let dir = tempdir().unwrap();
        let record = write_record(dir.path(), "record.json", &swept_hairpin());
        let output = dir.path().join("updated.json");
        let csv = dir.path().join("curve.csv");
        let dot = dir.path().join("dot.csv");

        run(MeltArgs {
            output: Some(output.clone()),
            csv: Some(csv.clone()),
            dot_plot: Some(dot.clone()),
            ..melt_args(record)
        })
        .unwrap();

        let updated = load_record(&output).unwrap();
        assert_eq!(updated.parameters(37, false).unwrap().melting_point, Some(67));
        let curve = std::fs::read_to_string(csv).unwrap();
        assert!(curve.starts_with("temperature,degradation,max\n"));
        assert_eq!(curve.lines().count(), 8);
        let dots = std::fs::read_to_string(dot).unwrap();
        assert!(dots.starts_with("i,j,probability\n1,12,0.9\n"));
    }

    #[test]
    fn run_honours_set_overrides() {
        let dir = tempdir().unwrap();
        let record = write_record(dir.path(), "record.json", &swept_hairpin());
        let output = dir.path().join("updated.json");

        run(MeltArgs {
            output: Some(output.clone()),
            set_values: vec![
                "profiling.sweep-end=57".to_string(),
                "profiling.unmelted-sentinel=67".to_string(),
            ],
            ..melt_args(record)
        })
        .unwrap();

        let updated = load_record(&output).unwrap();
        assert_eq!(updated.parameters(37, false).unwrap().melting_point, Some(67));
        assert!(updated.parameters(67, false).unwrap().prob_score.is_none());
    }
}
