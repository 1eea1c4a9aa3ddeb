use rusqlite::Connection;

use crate::types::{Dataset, LookupRow, TIMESTAMP_FORMAT};

const DATASET_SQL: &str = include_str!("sql/dataset.sql");

fn insert_lookup(
    tx: &rusqlite::Transaction<'_>,
    sql: &str,
    rows: &[LookupRow],
) -> Result<(), rusqlite::Error> {
    let mut stmt = tx.prepare_cached(sql)?;
    for row in rows {
        stmt.execute(rusqlite::params![row.id, row.name])?;
    }
    Ok(())
}

/// Drops and recreates the six dataset tables, then writes every dimension and
/// ticket in a single transaction. Returns the number of tickets written.
pub fn replace_dataset(conn: &mut Connection, dataset: &Dataset) -> Result<usize, rusqlite::Error> {
    let tx = conn.transaction()?;
    tx.execute_batch(DATASET_SQL)?;

    let dims = &dataset.dimensions;
    insert_lookup(
        &tx,
        "INSERT INTO priority (priority_id, priority_name) VALUES (?1, ?2)",
        &dims.priorities,
    )?;
    insert_lookup(
        &tx,
        "INSERT INTO status (status_id, status_name) VALUES (?1, ?2)",
        &dims.statuses,
    )?;
    insert_lookup(
        &tx,
        "INSERT INTO channel (channel_id, channel_name) VALUES (?1, ?2)",
        &dims.channels,
    )?;

    {
        let mut stmt =
            tx.prepare_cached("INSERT INTO customers (customer_id, name, email) VALUES (?1, ?2, ?3)")?;
        for c in &dims.customers {
            stmt.execute(rusqlite::params![c.id, c.name, c.email])?;
        }
    }

    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO agents (agent_id, full_name, email, team) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for a in &dims.agents {
            stmt.execute(rusqlite::params![a.id, a.full_name, a.email, a.team])?;
        }
    }

    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO tickets (
                ticket_id, customer_id, agent_id, priority_id, status_id, channel_id,
                created_at, resolved_at, sla_met, reopened
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;

        for t in &dataset.tickets {
            stmt.execute(rusqlite::params![
                t.id,
                t.customer_id,
                t.agent_id,
                t.priority_id,
                t.status_id,
                t.channel_id,
                t.created_at.format(TIMESTAMP_FORMAT).to_string(),
                t.resolved_at
                    .map(|r| r.format(TIMESTAMP_FORMAT).to_string()),
                t.sla_met as i32,
                t.reopened as i32,
            ])?;
        }
    }

    tx.commit()?;
    log::info!(
        "Dataset replaced: {} tickets, {} customers, {} agents",
        dataset.tickets.len(),
        dims.customers.len(),
        dims.agents.len()
    );
    Ok(dataset.tickets.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::generator::generate_dataset;
    use chrono::NaiveDateTime;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn count(conn: &Connection, table: &str) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    fn dataset(seed: u64) -> Dataset {
        let now = NaiveDateTime::parse_from_str("2025-06-30 12:00:00", TIMESTAMP_FORMAT).unwrap();
        generate_dataset(&mut StdRng::seed_from_u64(seed), &AppConfig::default(), now)
    }

    #[test]
    fn test_replace_dataset_writes_all_tables() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        let data = dataset(1);

        let written = replace_dataset(&mut conn, &data).unwrap();

        assert_eq!(written, data.tickets.len());
        assert_eq!(count(&conn, "tickets"), data.tickets.len() as i64);
        assert_eq!(count(&conn, "customers"), 50);
        assert_eq!(count(&conn, "agents"), 10);
        assert_eq!(count(&conn, "priority"), 4);
        assert_eq!(count(&conn, "status"), 3);
        assert_eq!(count(&conn, "channel"), 4);
    }

    #[test]
    fn test_regeneration_replaces_previous_dataset() {
        let mut conn = Connection::open_in_memory().unwrap();
        replace_dataset(&mut conn, &dataset(1)).unwrap();
        let second = dataset(2);
        replace_dataset(&mut conn, &second).unwrap();

        assert_eq!(count(&conn, "tickets"), second.tickets.len() as i64);
        assert_eq!(count(&conn, "priority"), 4);
    }

    #[test]
    fn test_unresolved_tickets_store_null() {
        let mut conn = Connection::open_in_memory().unwrap();
        replace_dataset(&mut conn, &dataset(3)).unwrap();

        let mismatched: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM tickets
                 WHERE (status_id = 3) != (resolved_at IS NOT NULL)",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(mismatched, 0);
    }
}
