pub mod inspect;
pub mod melt;
pub mod remap;

use crate::error::{CliError, Result};
use foldstore::engine::undo_block::UndoBlock;
use std::path::Path;
use tracing::info;

pub(crate) fn load_record(path: &Path) -> Result<UndoBlock> {
    info!("Loading fold record from {:?}", path);
    let content = std::fs::read_to_string(path)?;
    UndoBlock::from_json(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}
