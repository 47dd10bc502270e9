use crate::crawler::PostRecord;
use crate::HarvestError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the collected records as a pretty-printed JSON array
///
/// Any existing file at `path` is replaced; records are never appended or
/// merged. Missing parent directories are created.
///
/// # Arguments
///
/// * `path` - Destination file
/// * `records` - Records in the order they should appear
///
/// # Returns
///
/// * `Ok(())` - File written and flushed
/// * `Err(HarvestError)` - Failed to create or write the file
pub fn write_records(path: &Path, records: &[PostRecord]) -> Result<(), HarvestError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer
        .flush()
        .map_err(|e| HarvestError::Output(format!("Failed to flush {}: {}", path.display(), e)))?;

    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
