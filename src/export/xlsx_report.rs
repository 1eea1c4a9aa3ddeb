use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::analyzer::{CountItem, DashboardMetrics};
use crate::error::AppError;
use crate::export::csv_export::CSV_HEADERS;
use crate::export::{
    create_header_format, create_integer_format, create_number_format, create_percent_format,
};
use crate::types::{TicketRow, TIMESTAMP_FORMAT};

/// Two-sheet workbook: "KPI" (indicators, weekly volume, counts) and "Tickets"
/// (the filtered rows).
pub fn generate_dashboard_report(
    metrics: &DashboardMetrics,
    rows: &[TicketRow],
) -> Result<Vec<u8>, AppError> {
    let mut wb = Workbook::new();
    write_kpi_sheet(&mut wb, metrics)?;
    write_tickets_sheet(&mut wb, rows)?;
    Ok(wb.save_to_buffer()?)
}

// ── Sheet 1: KPI ─────────────────────────────────────────────────────────────

fn write_optional(
    ws: &mut Worksheet,
    row: u32,
    value: Option<f64>,
    fmt: &Format,
) -> Result<(), XlsxError> {
    match value {
        Some(v) => ws.write_with_format(row, 1, v, fmt)?,
        None => ws.write(row, 1, "N/A")?,
    };
    Ok(())
}

fn write_counts(
    ws: &mut Worksheet,
    start_row: u32,
    col: u16,
    title: &str,
    items: &[CountItem],
    hdr: &Format,
    int: &Format,
) -> Result<(), XlsxError> {
    ws.write_with_format(start_row, col, title, hdr)?;
    ws.write_with_format(start_row, col + 1, "Tickets", hdr)?;
    for (i, item) in items.iter().enumerate() {
        let row = start_row + 1 + i as u32;
        ws.write(row, col, item.label.as_str())?;
        ws.write_with_format(row, col + 1, item.count as f64, int)?;
    }
    Ok(())
}

fn write_kpi_sheet(wb: &mut Workbook, metrics: &DashboardMetrics) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("KPI")?;

    let hdr = create_header_format();
    let int = create_integer_format();
    let num = create_number_format();
    let pct = create_percent_format();
    let kpi = &metrics.kpi;

    ws.write_with_format(0, 0, "Indicator", &hdr)?;
    ws.write_with_format(0, 1, "Value", &hdr)?;
    ws.write(1, 0, "Total tickets")?;
    ws.write_with_format(1, 1, kpi.total_tickets as f64, &int)?;
    ws.write(2, 0, "Median resolution (hrs)")?;
    write_optional(ws, 2, kpi.median_resolution_hours, &num)?;
    ws.write(3, 0, "SLA breach")?;
    write_optional(ws, 3, kpi.sla_breach_percent.map(|p| p / 100.0), &pct)?;
    ws.write(4, 0, "Reopen rate")?;
    write_optional(ws, 4, kpi.reopen_rate_percent.map(|p| p / 100.0), &pct)?;

    // Weekly volume
    let weekly_row = 6;
    ws.write_with_format(weekly_row, 0, "Week ending", &hdr)?;
    ws.write_with_format(weekly_row, 1, "Tickets", &hdr)?;
    for (i, w) in metrics.weekly_volume.iter().enumerate() {
        let row = weekly_row + 1 + i as u32;
        ws.write(row, 0, w.week_ending.format("%Y-%m-%d").to_string())?;
        ws.write_with_format(row, 1, w.count as f64, &int)?;
    }

    write_counts(ws, weekly_row, 3, "Priority", &metrics.counts_by_priority, &hdr, &int)?;
    write_counts(ws, weekly_row, 6, "Agent", &metrics.counts_by_agent, &hdr, &int)?;

    ws.set_column_width(0, 26)?;
    ws.set_column_width(1, 14)?;
    ws.set_column_width(3, 14)?;
    ws.set_column_width(6, 26)?;

    Ok(())
}

// ── Sheet 2: Tickets ─────────────────────────────────────────────────────────

fn write_tickets_sheet(wb: &mut Workbook, rows: &[TicketRow]) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("Tickets")?;

    let hdr = create_header_format();
    for (col, h) in CSV_HEADERS.iter().enumerate() {
        ws.write_with_format(0, col as u16, *h, &hdr)?;
    }

    for (i, r) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        ws.write(row, 0, r.ticket_id as f64)?;
        ws.write(row, 1, r.customer_name.as_str())?;
        ws.write(row, 2, r.agent_name.as_str())?;
        ws.write(row, 3, r.priority.as_str())?;
        ws.write(row, 4, r.status.as_str())?;
        ws.write(row, 5, r.channel.as_str())?;
        ws.write(row, 6, r.created_at.format(TIMESTAMP_FORMAT).to_string())?;
        if let Some(resolved) = r.resolved_at {
            ws.write(row, 7, resolved.format(TIMESTAMP_FORMAT).to_string())?;
        }
        ws.write(row, 8, r.sla_met)?;
        ws.write(row, 9, r.reopened)?;
    }

    ws.set_freeze_panes(1, 0)?;
    ws.set_column_width(1, 24)?;
    ws.set_column_width(2, 24)?;
    ws.set_column_width(6, 20)?;
    ws.set_column_width(7, 20)?;

    Ok(())
}
