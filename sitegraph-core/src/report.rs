// Append-only result tables. One row per run, header only on creation.

use crate::audit::AuditSummary;
use crate::error::Result;
use crate::metrics::GraphMetrics;
use std::fs::OpenOptions;
use std::path::Path;
use tracing::debug;

pub const METRICS_HEADER: [&str; 5] = ["File Name", "Density", "Width", "Maximum Depth", "Leafs"];

pub const AUDIT_HEADER: [&str; 4] = [
    "File Name",
    "Number of pages with a login/password field",
    "Number of pages with forms or user interaction",
    "Maximum webpage size",
];

fn append_row<const N: usize>(path: &Path, header: [&str; N], row: [String; N]) -> Result<()> {
    let is_new = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if is_new {
        debug!("Creating results table {}", path.display());
        writer.write_record(header)?;
    }
    writer.write_record(row)?;
    writer.flush()?;
    Ok(())
}

pub fn metrics_row(file_name: &str, metrics: &GraphMetrics) -> [String; 5] {
    [
        file_name.to_string(),
        metrics.density.to_string(),
        metrics.width.to_string(),
        metrics.max_depth.to_string(),
        metrics.leafs.to_string(),
    ]
}

pub fn append_metrics_row(path: &Path, file_name: &str, metrics: &GraphMetrics) -> Result<()> {
    append_row(path, METRICS_HEADER, metrics_row(file_name, metrics))
}

pub fn append_audit_row(path: &Path, file_name: &str, summary: &AuditSummary) -> Result<()> {
    append_row(
        path,
        AUDIT_HEADER,
        [
            file_name.to_string(),
            summary.pages_with_login_field.to_string(),
            summary.pages_with_forms.to_string(),
            summary.max_size.to_string(),
        ],
    )
}
