use crate::core::models::plot::{DotPlotData, MeltCurve};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurveExportError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes `temperature,degradation,max` rows.
pub fn write_melt_curve(curve: &MeltCurve, writer: impl Write) -> Result<(), CurveExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in curve.points() {
        csv_writer.serialize(point)?;
    }
    csv_writer.flush().map_err(|e| CurveExportError::Csv(e.into()))?;
    Ok(())
}

/// Writes `i,j,probability` rows with 1-based positions.
pub fn write_dot_plot(data: &DotPlotData, writer: impl Write) -> Result<(), CurveExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in data.points() {
        csv_writer.serialize(point)?;
    }
    csv_writer.flush().map_err(|e| CurveExportError::Csv(e.into()))?;
    Ok(())
}

pub fn write_melt_curve_to_path(curve: &MeltCurve, path: &Path) -> Result<(), CurveExportError> {
    let file = File::create(path).map_err(|e| CurveExportError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    write_melt_curve(curve, file)
}

pub fn write_dot_plot_to_path(data: &DotPlotData, path: &Path) -> Result<(), CurveExportError> {
    let file = File::create(path).map_err(|e| CurveExportError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    write_dot_plot(data, file)
}
