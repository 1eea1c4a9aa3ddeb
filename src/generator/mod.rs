pub mod seeder;
pub mod synthesizer;

use chrono::NaiveDateTime;
use rand::Rng;
use serde::Serialize;

use crate::config::AppConfig;
use crate::types::{Dataset, CLOSED_STATUS_ID};

pub use seeder::seed_dimensions;
pub use synthesizer::{synthesize_tickets, ResolutionOutcome};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSummary {
    pub store_path: String,
    pub seed: Option<u64>,
    pub total_tickets: usize,
    pub closed_tickets: usize,
    pub customers: usize,
    pub agents: usize,
    pub generated_at: NaiveDateTime,
    pub duration_ms: u64,
}

/// Seeds the dimensions then synthesizes tickets against them.
/// Pure in `(rng state, config, now)`.
pub fn generate_dataset<R: Rng + ?Sized>(
    rng: &mut R,
    config: &AppConfig,
    now: NaiveDateTime,
) -> Dataset {
    let dimensions = seed_dimensions(rng, config);
    let tickets = synthesize_tickets(rng, &dimensions, config, now);
    Dataset {
        dimensions,
        tickets,
    }
}

pub fn closed_count(dataset: &Dataset) -> usize {
    dataset
        .tickets
        .iter()
        .filter(|t| t.status_id == CLOSED_STATUS_ID)
        .count()
}
