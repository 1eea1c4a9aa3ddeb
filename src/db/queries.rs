use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Type;
use rusqlite::Connection;

use crate::analyzer::filter::FilterOptions;
use crate::types::{Agent, Customer, TicketRow};

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Accepts the storage format plus the ISO variants SQLite tooling tends to write.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    for fmt in &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn timestamp_column(row: &rusqlite::Row<'_>, idx: usize) -> Result<NaiveDateTime, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unparsable timestamp: {}", raw).into(),
        )
    })
}

fn opt_timestamp_column(
    row: &rusqlite::Row<'_>,
    idx: usize,
) -> Result<Option<NaiveDateTime>, rusqlite::Error> {
    match row.get::<_, Option<String>>(idx)? {
        None => Ok(None),
        Some(_) => timestamp_column(row, idx).map(Some),
    }
}

// ─── Denormalized view ────────────────────────────────────────────────────────

/// Joins every ticket to its five dimensions. Tickets whose foreign keys do not
/// resolve fall out of the inner join.
pub fn load_ticket_view(conn: &Connection) -> Result<Vec<TicketRow>, rusqlite::Error> {
    let mut stmt = conn.prepare_cached(
        "SELECT
            t.ticket_id,
            c.name,
            a.full_name,
            p.priority_name,
            s.status_name,
            ch.channel_name,
            t.created_at,
            t.resolved_at,
            t.sla_met,
            t.reopened
         FROM tickets t
         JOIN customers c ON c.customer_id = t.customer_id
         JOIN agents a ON a.agent_id = t.agent_id
         JOIN priority p ON p.priority_id = t.priority_id
         JOIN status s ON s.status_id = t.status_id
         JOIN channel ch ON ch.channel_id = t.channel_id
         ORDER BY t.ticket_id",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(TicketRow {
                ticket_id: row.get(0)?,
                customer_name: row.get(1)?,
                agent_name: row.get(2)?,
                priority: row.get(3)?,
                status: row.get(4)?,
                channel: row.get(5)?,
                created_at: timestamp_column(row, 6)?,
                resolved_at: opt_timestamp_column(row, 7)?,
                sla_met: row.get::<_, i64>(8)? != 0,
                reopened: row.get::<_, i64>(9)? != 0,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let total: i64 = conn.query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))?;
    let dropped = total - rows.len() as i64;
    if dropped > 0 {
        log::warn!("{} tickets dropped by the join (unresolved foreign keys)", dropped);
    }
    log::debug!("Loaded {} ticket rows", rows.len());

    Ok(rows)
}

/// Distinct, sorted values offered by the dashboard filters, plus the
/// `created_at` date bounds, taken from parsed timestamps rather than text order.
pub fn load_filter_options(conn: &Connection) -> Result<FilterOptions, rusqlite::Error> {
    fn distinct(conn: &Connection, sql: &str) -> Result<Vec<String>, rusqlite::Error> {
        let mut stmt = conn.prepare_cached(sql)?;
        let values = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    }

    let priorities = distinct(
        conn,
        "SELECT DISTINCT p.priority_name FROM tickets t
         JOIN priority p ON p.priority_id = t.priority_id
         ORDER BY p.priority_name",
    )?;
    let agents = distinct(
        conn,
        "SELECT DISTINCT a.full_name FROM tickets t
         JOIN agents a ON a.agent_id = t.agent_id
         ORDER BY a.full_name",
    )?;
    let statuses = distinct(
        conn,
        "SELECT DISTINCT s.status_name FROM tickets t
         JOIN status s ON s.status_id = t.status_id
         ORDER BY s.status_name",
    )?;

    let mut stmt = conn.prepare_cached("SELECT created_at FROM tickets")?;
    let mut min_date: Option<NaiveDate> = None;
    let mut max_date: Option<NaiveDate> = None;
    for raw in stmt.query_map([], |row| row.get::<_, String>(0))? {
        if let Some(date) = parse_timestamp(&raw?).map(|d| d.date()) {
            min_date = Some(min_date.map_or(date, |m| m.min(date)));
            max_date = Some(max_date.map_or(date, |m| m.max(date)));
        }
    }

    Ok(FilterOptions {
        priorities,
        agents,
        statuses,
        min_date,
        max_date,
    })
}

// ─── Dimensions ───────────────────────────────────────────────────────────────

pub fn load_customers(conn: &Connection) -> Result<Vec<Customer>, rusqlite::Error> {
    let mut stmt =
        conn.prepare_cached("SELECT customer_id, name, email FROM customers ORDER BY customer_id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Customer {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn load_agents(conn: &Connection) -> Result<Vec<Agent>, rusqlite::Error> {
    let mut stmt = conn
        .prepare_cached("SELECT agent_id, full_name, email, team FROM agents ORDER BY agent_id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(Agent {
                id: row.get(0)?,
                full_name: row.get(1)?,
                email: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                team: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
