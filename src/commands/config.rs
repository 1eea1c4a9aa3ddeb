use crate::config::{get_config_from_db, update_config_in_db, AppConfig};
use crate::db::setup::open_existing;
use crate::error::AppError;
use crate::state::{DbAccess, Store};

/// Current configuration. Never creates the store: a missing file or config
/// table yields the defaults.
pub fn get_config(store: &Store) -> Result<AppConfig, AppError> {
    let Some(conn) = open_existing(store.path())? else {
        return Ok(AppConfig::default());
    };
    Ok(get_config_from_db(&conn).unwrap_or_else(|e| {
        log::warn!("Config unavailable ({}), using defaults", e);
        AppConfig::default()
    }))
}

/// Updates one generation parameter and persists the whole configuration.
pub fn set_config_value(store: &Store, key: &str, value: &str) -> Result<AppConfig, AppError> {
    store.db_mut(|conn| {
        let mut config = get_config_from_db(conn)?;
        config.set_key(key, value)?;
        update_config_in_db(conn, &config)?;
        log::info!("Config updated: {} = {}", key, value);
        Ok(config)
    })
}
