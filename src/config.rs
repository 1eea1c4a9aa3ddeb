use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Upper bounds keeping generated timestamps well inside chrono's range.
pub const MAX_WINDOW_DAYS: u32 = 36_500;
pub const MAX_RESOLUTION_HOURS: u32 = 24 * 365;

/// Generation parameters, persisted as key/value rows in the `config` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub customer_count: u32,
    pub agent_count: u32,
    pub min_tickets: u32,
    pub max_tickets: u32,
    pub window_days: u32,
    pub sla_hours: u32,
    pub max_resolution_hours: u32,
    pub reopen_probability: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            customer_count: 50,
            agent_count: 10,
            min_tickets: 300,
            max_tickets: 500,
            window_days: 120,
            sla_hours: 24,
            max_resolution_hours: 72,
            reopen_probability: 0.10,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.customer_count == 0 {
            return Err(AppError::InvalidConfig("customerCount must be at least 1".into()));
        }
        if self.agent_count == 0 {
            return Err(AppError::InvalidConfig("agentCount must be at least 1".into()));
        }
        if self.min_tickets > self.max_tickets {
            return Err(AppError::InvalidConfig(format!(
                "minTickets ({}) exceeds maxTickets ({})",
                self.min_tickets, self.max_tickets
            )));
        }
        if !(1..=MAX_WINDOW_DAYS).contains(&self.window_days) {
            return Err(AppError::InvalidConfig(format!(
                "windowDays must lie in [1, {}], got {}",
                MAX_WINDOW_DAYS, self.window_days
            )));
        }
        if !(1..=MAX_RESOLUTION_HOURS).contains(&self.max_resolution_hours) {
            return Err(AppError::InvalidConfig(format!(
                "maxResolutionHours must lie in [1, {}], got {}",
                MAX_RESOLUTION_HOURS, self.max_resolution_hours
            )));
        }
        if !(0.0..=1.0).contains(&self.reopen_probability) {
            return Err(AppError::InvalidConfig(format!(
                "reopenProbability must lie in [0, 1], got {}",
                self.reopen_probability
            )));
        }
        Ok(())
    }

    /// Updates a single field by its snake_case key. Leaves `self` untouched
    /// when the value does not parse or the result fails validation.
    pub fn set_key(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        let bad = || AppError::InvalidConfig(format!("invalid value for {}: {}", key, value));
        let mut next = self.clone();
        match key {
            "customer_count" => next.customer_count = value.parse().map_err(|_| bad())?,
            "agent_count" => next.agent_count = value.parse().map_err(|_| bad())?,
            "min_tickets" => next.min_tickets = value.parse().map_err(|_| bad())?,
            "max_tickets" => next.max_tickets = value.parse().map_err(|_| bad())?,
            "window_days" => next.window_days = value.parse().map_err(|_| bad())?,
            "sla_hours" => next.sla_hours = value.parse().map_err(|_| bad())?,
            "max_resolution_hours" => next.max_resolution_hours = value.parse().map_err(|_| bad())?,
            "reopen_probability" => next.reopen_probability = value.parse().map_err(|_| bad())?,
            _ => return Err(AppError::InvalidConfig(format!("unknown key: {}", key))),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Human-readable generation rules, shown next to the dashboard.
    pub fn assumptions(&self) -> Vec<String> {
        vec![
            "Synthetic data generated with fake names and emails.".to_string(),
            format!("SLA window: {} hours.", self.sla_hours),
            format!("Reopen probability: {:.0}%.", self.reopen_probability * 100.0),
            format!("Tickets span the last {} days.", self.window_days),
            format!(
                "{} to {} tickets per generation run.",
                self.min_tickets, self.max_tickets
            ),
        ]
    }
}

pub fn get_config_from_db(conn: &Connection) -> Result<AppConfig, rusqlite::Error> {
    let mut stmt = conn.prepare_cached("SELECT key, value FROM config")?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let defaults = AppConfig::default();
    let mut config = defaults.clone();

    for row in rows {
        let (key, value) = row?;
        match key.as_str() {
            "customer_count" => {
                config.customer_count = value.parse().unwrap_or(defaults.customer_count)
            }
            "agent_count" => config.agent_count = value.parse().unwrap_or(defaults.agent_count),
            "min_tickets" => config.min_tickets = value.parse().unwrap_or(defaults.min_tickets),
            "max_tickets" => config.max_tickets = value.parse().unwrap_or(defaults.max_tickets),
            "window_days" => config.window_days = value.parse().unwrap_or(defaults.window_days),
            "sla_hours" => config.sla_hours = value.parse().unwrap_or(defaults.sla_hours),
            "max_resolution_hours" => {
                config.max_resolution_hours =
                    value.parse().unwrap_or(defaults.max_resolution_hours)
            }
            "reopen_probability" => {
                config.reopen_probability = value.parse().unwrap_or(defaults.reopen_probability)
            }
            _ => {}
        }
    }

    Ok(config)
}

pub fn update_config_in_db(conn: &Connection, config: &AppConfig) -> Result<(), rusqlite::Error> {
    let pairs: Vec<(&str, String)> = vec![
        ("customer_count", config.customer_count.to_string()),
        ("agent_count", config.agent_count.to_string()),
        ("min_tickets", config.min_tickets.to_string()),
        ("max_tickets", config.max_tickets.to_string()),
        ("window_days", config.window_days.to_string()),
        ("sla_hours", config.sla_hours.to_string()),
        (
            "max_resolution_hours",
            config.max_resolution_hours.to_string(),
        ),
        ("reopen_probability", config.reopen_probability.to_string()),
    ];

    let mut stmt = conn.prepare_cached(
        "INSERT OR REPLACE INTO config (key, value, updated_at) VALUES (?1, ?2, datetime('now'))",
    )?;

    for (key, value) in pairs {
        stmt.execute(rusqlite::params![key, value])?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_defaults_when_table_empty() {
        let conn = setup_db();
        let config = get_config_from_db(&conn).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.customer_count, 50);
        assert_eq!(config.agent_count, 10);
        assert_eq!(config.sla_hours, 24);
    }

    #[test]
    fn test_update_then_read_back() {
        let conn = setup_db();
        let mut config = AppConfig::default();
        config.customer_count = 80;
        config.reopen_probability = 0.25;
        update_config_in_db(&conn, &config).unwrap();

        let loaded = get_config_from_db(&conn).unwrap();
        assert_eq!(loaded.customer_count, 80);
        assert!((loaded.reopen_probability - 0.25).abs() < 1e-12);
        assert_eq!(loaded.agent_count, 10);
    }

    #[test]
    fn test_unparsable_value_falls_back() {
        let conn = setup_db();
        conn.execute(
            "INSERT INTO config (key, value) VALUES ('agent_count', 'beaucoup')",
            [],
        )
        .unwrap();
        assert_eq!(get_config_from_db(&conn).unwrap().agent_count, 10);
    }

    #[test]
    fn test_set_key() {
        let mut config = AppConfig::default();
        config.set_key("max_tickets", "900").unwrap();
        assert_eq!(config.max_tickets, 900);

        assert!(config.set_key("nope", "1").is_err());
        assert!(config.set_key("agent_count", "-3").is_err());
        assert!(config.set_key("reopen_probability", "1.5").is_err());
    }

    #[test]
    fn test_set_key_rejects_out_of_range_spans() {
        let mut config = AppConfig::default();
        assert!(config.set_key("max_resolution_hours", "4000000000").is_err());
        assert!(config.set_key("window_days", "200000000").is_err());
        assert!(config.set_key("window_days", "0").is_err());
        assert_eq!(config, AppConfig::default());

        config.set_key("window_days", &MAX_WINDOW_DAYS.to_string()).unwrap();
        config
            .set_key("max_resolution_hours", &MAX_RESOLUTION_HOURS.to_string())
            .unwrap();
        assert_eq!(config.window_days, MAX_WINDOW_DAYS);
        assert_eq!(config.max_resolution_hours, MAX_RESOLUTION_HOURS);
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let config = AppConfig {
            min_tickets: 600,
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig(_))));
    }
}
