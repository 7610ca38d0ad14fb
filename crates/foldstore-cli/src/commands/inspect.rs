use super::load_record;
use crate::cli::InspectArgs;
use crate::error::Result;
use foldstore::core::models::base::sequence_to_string;
use foldstore::core::models::params::{FoldParameters, ParamValue};
use foldstore::core::structure::pairs::to_dot_bracket;
use foldstore::engine::undo_block::UndoBlock;
use std::fmt::Write;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    let block = load_record(&args.record)?;
    info!("Summarizing {} cached fold(s).", block.folds().len());
    print!("{}", summarize(&block));
    Ok(())
}

pub fn summarize(block: &UndoBlock) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Sequence ({} nt): {}", block.sequence().len(), sequence_to_string(block.sequence()));
    if let Some(conditions) = block.target_conditions() {
        let _ = writeln!(out, "Target: {}", conditions.topology().as_str());
    }
    let _ = writeln!(out, "Oligo mode: {:?}", block.oligo_mode());
    if let Some(name) = block.oligo_name() {
        let _ = writeln!(out, "Oligo name: {}", name);
    }
    if let Some(oligo) = block.target_oligo() {
        let _ = writeln!(out, "Target oligo: {}", sequence_to_string(oligo));
    }
    if let Some(oligos) = block.target_oligos() {
        for (index, oligo) in oligos.iter().enumerate() {
            let _ = writeln!(
                out,
                "Oligo {}: {} {}",
                index,
                oligo.name.as_deref().unwrap_or("-"),
                sequence_to_string(&oligo.sequence)
            );
        }
    }
    if let Some(order) = block.oligo_order() {
        let _ = writeln!(out, "Oligo order: {:?}", order);
    }
    let _ = writeln!(out, "Stable: {}", block.stable());

    for (condition, cell) in block.folds().iter() {
        let partition = if condition.pseudoknots { "pseudoknots" } else { "nested" };
        let _ = writeln!(out, "\n[{}°C, {}]", condition.temperature, partition);
        if let Some(pairs) = cell.pairing() {
            let _ = writeln!(out, "  structure: {}", to_dot_bracket(pairs));
        }
        if let Some(params) = cell.parameters() {
            write_parameters(&mut out, params);
        }
    }
    out
}

fn write_parameters(out: &mut String, params: &FoldParameters) {
    for kind in params.present_kinds() {
        let Some(value) = params.get(kind) else { continue };
        let text = match value {
            ParamValue::Scalar(v) => format!("{}", v),
            ParamValue::Array(values) => format!("[{} values]", values.len()),
        };
        let _ = writeln!(out, "  {:<16} {}", kind.name(), text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::swept_hairpin;
    use foldstore::core::models::params::ParamKind;

    #[test]
    fn summary_lists_sequence_oligos_and_cells() {
        let mut block = swept_hairpin();
        block
            .set_parameter(ParamKind::FreeEnergy, -6.5, 37, false)
            .unwrap();

        let summary = summarize(&block);

        assert!(summary.contains("Sequence (12 nt): GGGGAAAACCCC"));
        assert!(summary.contains("Oligo 1: right UUUU"));
        assert!(summary.contains("[37°C, nested]"));
        assert!(summary.contains("structure: ((((....))))"));
        assert!(summary.contains("FE               -6.5"));
        assert!(summary.contains("DOTPLOT          [12 values]"));
        assert!(summary.contains("[97°C, nested]"));
        assert!(!summary.contains("pseudoknots]"));
    }
}
