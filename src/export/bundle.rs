use std::collections::BTreeMap;
use std::io::Write as _;

use crate::error::AppError;
use crate::export::csv_export::to_csv_bytes;
use crate::types::TicketRow;

/// Filesystem-safe entry name for an agent.
pub fn safe_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// ZIP archive holding one CSV per agent present in `rows`.
pub fn generate_agent_bundle(rows: &[TicketRow]) -> Result<Vec<u8>, AppError> {
    let mut by_agent: BTreeMap<&str, Vec<TicketRow>> = BTreeMap::new();
    for r in rows {
        by_agent.entry(r.agent_name.as_str()).or_default().push(r.clone());
    }

    let cursor = std::io::Cursor::new(Vec::new());
    let mut zip = zip::ZipWriter::new(cursor);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (agent, agent_rows) in &by_agent {
        let bytes = to_csv_bytes(agent_rows)?;
        zip.start_file(format!("{}.csv", safe_file_name(agent)), options)?;
        zip.write_all(&bytes)?;
    }

    let cursor = zip.finish()?;
    log::debug!("Agent bundle built with {} entries", by_agent.len());
    Ok(cursor.into_inner())
}
