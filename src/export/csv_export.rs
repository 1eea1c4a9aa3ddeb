use std::io::Write;

use crate::error::AppError;
use crate::types::{TicketRow, TIMESTAMP_FORMAT};

/// File name offered for the filtered-table download.
pub const EXPORT_FILENAME: &str = "filtered_tickets.csv";

pub const CSV_HEADERS: [&str; 10] = [
    "ticket_id",
    "customer_name",
    "agent_name",
    "priority",
    "status",
    "channel",
    "created_at",
    "resolved_at",
    "sla_met",
    "reopened",
];

pub fn write_csv<W: Write>(writer: W, rows: &[TicketRow]) -> Result<W, AppError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;

    for r in rows {
        let created_at = r.created_at.format(TIMESTAMP_FORMAT).to_string();
        let resolved_at = r
            .resolved_at
            .map(|d| d.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_default();
        wtr.write_record([
            r.ticket_id.to_string().as_str(),
            r.customer_name.as_str(),
            r.agent_name.as_str(),
            r.priority.as_str(),
            r.status.as_str(),
            r.channel.as_str(),
            created_at.as_str(),
            resolved_at.as_str(),
            if r.sla_met { "1" } else { "0" },
            if r.reopened { "1" } else { "0" },
        ])?;
    }

    wtr.into_inner().map_err(|e| AppError::Io(e.into_error()))
}

/// UTF-8 CSV of the given rows, header included.
pub fn to_csv_bytes(rows: &[TicketRow]) -> Result<Vec<u8>, AppError> {
    write_csv(Vec::new(), rows)
}
