use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{ALL_CSV_REPORT, ALL_TXT_REPORT, LATEST_CSV_REPORT, LATEST_TXT_REPORT};
use crate::formatters;
use crate::types::ScanReport;

/// Writes the four report artifacts into `out_dir`, creating it if needed.
///
/// # Errors
/// Returns an error if the directory cannot be created or a file cannot be written.
pub fn write_reports(report: &ScanReport, out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;
    let artifacts = [
        (ALL_TXT_REPORT, formatters::text::format_all_file(&report.all)),
        (ALL_CSV_REPORT, formatters::csv::format(&report.all)),
        (LATEST_TXT_REPORT, formatters::text::format_latest_file(&report.latest)),
        (LATEST_CSV_REPORT, formatters::csv::format(&report.latest)),
    ];
    let mut written = Vec::with_capacity(artifacts.len());
    for (name, body) in artifacts {
        let path = out_dir.join(name);
        fs::write(&path, body).with_context(|| format!("write {}", path.display()))?;
        tracing::debug!("wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}
