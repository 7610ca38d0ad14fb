use super::load_record;
use crate::cli::RemapArgs;
use crate::error::Result;
use tracing::info;

pub fn run(args: RemapArgs) -> Result<()> {
    let block = load_record(&args.record)?;
    match block.reordered_oligos_index_map(args.order.as_deref())? {
        Some(map) => {
            info!("Remapped {} position(s).", map.len());
            println!("{}", format_map(&map));
        }
        None => println!("Record has no target oligos; nothing to remap."),
    }
    Ok(())
}

pub fn format_map(map: &[usize]) -> String {
    map.iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
