use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use crate::analyzer::compute_metrics;
use crate::error::AppError;
use crate::export::bundle::generate_agent_bundle;
use crate::export::xlsx_report::generate_dashboard_report;
use crate::export::{to_csv_bytes, EXPORT_FILENAME};
use crate::state::Store;

use super::dashboard::{load_filtered_view, DashboardRequest};

pub const XLSX_FILENAME: &str = "filtered_tickets.xlsx";
pub const BUNDLE_FILENAME: &str = "tickets_by_agent.zip";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub path: String,
    pub rows: usize,
    pub size_bytes: u64,
    pub duration_ms: u64,
}

fn write_export(
    path: &Path,
    bytes: &[u8],
    rows: usize,
    start: Instant,
) -> Result<ExportResult, AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    log::info!("Exported {} rows to {} ({} bytes)", rows, path.display(), bytes.len());

    Ok(ExportResult {
        path: path.display().to_string(),
        rows,
        size_bytes: bytes.len() as u64,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Filtered rows as `filtered_tickets.csv` (or `out`).
pub fn export_csv(
    store: &Store,
    request: &DashboardRequest,
    out: Option<PathBuf>,
) -> Result<ExportResult, AppError> {
    let start = Instant::now();
    let view = load_filtered_view(store, request)?;
    let bytes = to_csv_bytes(&view.rows)?;
    let path = out.unwrap_or_else(|| PathBuf::from(EXPORT_FILENAME));
    write_export(&path, &bytes, view.rows.len(), start)
}

pub fn export_xlsx(
    store: &Store,
    request: &DashboardRequest,
    out: Option<PathBuf>,
) -> Result<ExportResult, AppError> {
    let start = Instant::now();
    let view = load_filtered_view(store, request)?;
    let metrics = compute_metrics(&view.rows);
    let bytes = generate_dashboard_report(&metrics, &view.rows)?;
    let path = out.unwrap_or_else(|| PathBuf::from(XLSX_FILENAME));
    write_export(&path, &bytes, view.rows.len(), start)
}

pub fn export_agent_bundle(
    store: &Store,
    request: &DashboardRequest,
    out: Option<PathBuf>,
) -> Result<ExportResult, AppError> {
    let start = Instant::now();
    let view = load_filtered_view(store, request)?;
    let bytes = generate_agent_bundle(&view.rows)?;
    let path = out.unwrap_or_else(|| PathBuf::from(BUNDLE_FILENAME));
    write_export(&path, &bytes, view.rows.len(), start)
}
