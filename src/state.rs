use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::db::setup::{init_db, open_read_only};
use crate::error::AppError;

/// Handle on the dataset store. Holds only the path: each operation opens its own
/// connection and releases it when the closure returns.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub trait DbAccess {
    /// Read-only access to an existing dataset.
    fn db<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&Connection) -> Result<T, AppError>;

    /// Read-write access; creates the store and applies migrations if needed.
    fn db_mut<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Connection) -> Result<T, AppError>;
}

impl DbAccess for Store {
    fn db<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&Connection) -> Result<T, AppError>,
    {
        let conn = open_read_only(&self.path)?;
        f(&conn)
    }

    fn db_mut<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Connection) -> Result<T, AppError>,
    {
        let mut conn = init_db(&self.path)?;
        f(&mut conn)
    }
}
