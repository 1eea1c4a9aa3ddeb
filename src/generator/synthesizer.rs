use chrono::{Duration, NaiveDateTime};
use rand::Rng;

use crate::config::AppConfig;
use crate::types::{Dimensions, Ticket, CLOSED_STATUS_ID};

/// Outcome of a ticket's lifecycle, sampled once and projected into
/// `resolved_at`, `sla_met` and `reopened`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Unresolved,
    Resolved { delay_hours: u32, reopened: bool },
}

impl ResolutionOutcome {
    /// Closed tickets draw a delay in [1, max_resolution_hours] and an independent
    /// reopen flag; every other status stays unresolved.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, status_id: i64, config: &AppConfig) -> Self {
        if status_id != CLOSED_STATUS_ID {
            return ResolutionOutcome::Unresolved;
        }
        let delay_hours = rng.random_range(1..=config.max_resolution_hours);
        let reopened = rng.random_bool(config.reopen_probability);
        ResolutionOutcome::Resolved {
            delay_hours,
            reopened,
        }
    }

    pub fn resolved_at(&self, created_at: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            ResolutionOutcome::Unresolved => None,
            ResolutionOutcome::Resolved { delay_hours, .. } => {
                Some(created_at + Duration::hours(*delay_hours as i64))
            }
        }
    }

    pub fn sla_met(&self, sla_hours: u32) -> bool {
        match self {
            ResolutionOutcome::Unresolved => false,
            ResolutionOutcome::Resolved { delay_hours, .. } => *delay_hours <= sla_hours,
        }
    }

    pub fn reopened(&self) -> bool {
        matches!(self, ResolutionOutcome::Resolved { reopened: true, .. })
    }
}

/// Uniform creation time at minute granularity in `[now - window_days, now)`.
pub fn sample_created_at<R: Rng + ?Sized>(
    rng: &mut R,
    now: NaiveDateTime,
    window_days: u32,
) -> NaiveDateTime {
    let window_start = now - Duration::days(window_days as i64);
    let window_minutes = window_days as i64 * 24 * 60;
    window_start + Duration::minutes(rng.random_range(0..window_minutes))
}

pub fn synthesize_tickets<R: Rng + ?Sized>(
    rng: &mut R,
    dims: &Dimensions,
    config: &AppConfig,
    now: NaiveDateTime,
) -> Vec<Ticket> {
    let count = rng.random_range(config.min_tickets..=config.max_tickets) as i64;
    let n_customers = dims.customers.len() as i64;
    let n_agents = dims.agents.len() as i64;
    let n_priorities = dims.priorities.len() as i64;
    let n_statuses = dims.statuses.len() as i64;
    let n_channels = dims.channels.len() as i64;

    let mut tickets = Vec::with_capacity(count as usize);
    for id in 1..=count {
        let customer_id = rng.random_range(1..=n_customers);
        let agent_id = rng.random_range(1..=n_agents);
        let priority_id = rng.random_range(1..=n_priorities);
        let status_id = rng.random_range(1..=n_statuses);
        let channel_id = rng.random_range(1..=n_channels);
        let created_at = sample_created_at(rng, now, config.window_days);

        let outcome = ResolutionOutcome::sample(rng, status_id, config);

        tickets.push(Ticket {
            id,
            customer_id,
            agent_id,
            priority_id,
            status_id,
            channel_id,
            created_at,
            resolved_at: outcome.resolved_at(created_at),
            sla_met: outcome.sla_met(config.sla_hours),
            reopened: outcome.reopened(),
        });
    }

    tickets
}
