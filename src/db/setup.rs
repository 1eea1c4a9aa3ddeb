use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use super::migrations::run_migrations;
use crate::error::AppError;

pub const DATASET_TABLES: [&str; 6] = ["tickets", "customers", "agents", "priority", "status", "channel"];

fn unavailable(path: &Path, reason: impl ToString) -> AppError {
    AppError::StoreUnavailable {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Opens (creating if needed) the store for writing and applies migrations.
pub fn init_db(path: &Path) -> Result<Connection, AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| unavailable(path, e))?;
        }
    }

    let conn = Connection::open(path).map_err(|e| unavailable(path, e))?;

    conn.execute_batch(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        PRAGMA temp_store = MEMORY;
    ",
    )
    .map_err(|e| unavailable(path, e))?;

    run_migrations(&conn)?;

    Ok(conn)
}

/// Opens an existing store read-only. Fails with `StoreUnavailable` when the file
/// is missing or holds no generated dataset.
pub fn open_read_only(path: &Path) -> Result<Connection, AppError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| unavailable(path, e))?;

    conn.execute_batch("PRAGMA busy_timeout = 5000;")
        .map_err(|e| unavailable(path, e))?;

    let missing = missing_dataset_tables(&conn).map_err(|e| unavailable(path, e))?;
    if !missing.is_empty() {
        return Err(unavailable(
            path,
            format!("missing tables: {}", missing.join(", ")),
        ));
    }

    Ok(conn)
}

/// Opens the store read-only without requiring a dataset. `None` when the file
/// does not exist; nothing is created.
pub fn open_existing(path: &Path) -> Result<Option<Connection>, AppError> {
    if !path.is_file() {
        return Ok(None);
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| unavailable(path, e))?;
    Ok(Some(conn))
}

pub fn missing_dataset_tables(conn: &Connection) -> Result<Vec<&'static str>, rusqlite::Error> {
    let mut stmt = conn
        .prepare_cached("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    let mut missing = Vec::new();
    for table in DATASET_TABLES {
        let count: i64 = stmt.query_row([table], |row| row.get(0))?;
        if count == 0 {
            missing.push(table);
        }
    }
    Ok(missing)
}
