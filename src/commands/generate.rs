use std::time::Instant;

use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::get_config_from_db;
use crate::db::insert::replace_dataset;
use crate::error::AppError;
use crate::generator::{closed_count, generate_dataset, GenerationSummary};
use crate::state::{DbAccess, Store};

/// Rebuilds the whole dataset in `store`. `seed = None` draws from OS entropy.
pub fn run_generation(
    store: &Store,
    seed: Option<u64>,
    now: NaiveDateTime,
) -> Result<GenerationSummary, AppError> {
    let start = Instant::now();

    store.db_mut(|conn| {
        let config = get_config_from_db(conn)?;
        config.validate()?;

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let dataset = generate_dataset(&mut rng, &config, now);
        let total_tickets = replace_dataset(conn, &dataset)?;

        let summary = GenerationSummary {
            store_path: store.path().display().to_string(),
            seed,
            total_tickets,
            closed_tickets: closed_count(&dataset),
            customers: dataset.dimensions.customers.len(),
            agents: dataset.dimensions.agents.len(),
            generated_at: now,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        log::info!(
            "Database created at {} with {} tickets",
            summary.store_path,
            summary.total_tickets
        );
        Ok(summary)
    })
}
