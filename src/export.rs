use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::grid::RawGrid;
use crate::model::{IMPORT_COLUMNS, ImportRow};
use crate::util::ensure_parent_directory;

pub fn write_import_csv(path: &Path, rows: &[ImportRow]) -> Result<()> {
    ensure_parent_directory(path)?;

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create import file: {}", path.display()))?;

    if rows.is_empty() {
        writer
            .write_record(IMPORT_COLUMNS)
            .with_context(|| format!("failed to write import header: {}", path.display()))?;
    }
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("failed to write import row: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush import file: {}", path.display()))?;

    info!(path = %path.display(), rows = rows.len(), "wrote import file");
    Ok(())
}

pub fn write_grid_csv(path: &Path, grid: &RawGrid) -> Result<()> {
    ensure_parent_directory(path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to create output file: {}", path.display()))?;

    for row in grid.rows() {
        writer
            .write_record(row)
            .with_context(|| format!("failed to write row: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush output file: {}", path.display()))?;

    info!(path = %path.display(), rows = grid.len(), "wrote cleaned grid");
    Ok(())
}
