use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::dataset::Dataset;

pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output dir: {}", dir.display()))?;
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_to(dataset, file)
}

/// Passthrough columns first (empty when a source lacked them), then the
/// derived columns.
pub fn write_to<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(dataset.columns())?;

    for r in &dataset.records {
        let label = r.label.to_string();
        let row = dataset
            .passthrough
            .iter()
            .map(|c| r.original(c).unwrap_or(""))
            .chain([
                r.clean_title.as_str(),
                r.clean_narasi.as_str(),
                r.clean_penjelasan.as_str(),
                r.final_text.as_str(),
                label.as_str(),
            ]);
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
