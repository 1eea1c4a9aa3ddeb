use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::TicketRow;

/// Values the dashboard offers in its filter widgets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub priorities: Vec<String>,
    pub agents: Vec<String>,
    pub statuses: Vec<String>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

/// Inclusive range compared against the date part of `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Conjunction of the four dashboard predicates.
///
/// The selections are literal: an empty set matches nothing. `date_range = None`
/// leaves dates unconstrained, which only happens for a dataset with no tickets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketFilter {
    pub date_range: Option<DateRange>,
    pub priorities: BTreeSet<String>,
    pub agents: BTreeSet<String>,
    pub statuses: BTreeSet<String>,
}

impl TicketFilter {
    /// Default dashboard filter: full date span, every value selected.
    pub fn select_all(options: &FilterOptions) -> Self {
        let date_range = match (options.min_date, options.max_date) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        };
        TicketFilter {
            date_range,
            priorities: options.priorities.iter().cloned().collect(),
            agents: options.agents.iter().cloned().collect(),
            statuses: options.statuses.iter().cloned().collect(),
        }
    }

    pub fn matches(&self, row: &TicketRow) -> bool {
        self.date_range
            .map_or(true, |range| range.contains(row.created_at.date()))
            && self.priorities.contains(&row.priority)
            && self.agents.contains(&row.agent_name)
            && self.statuses.contains(&row.status)
    }
}

pub fn apply_filter(rows: &[TicketRow], filter: &TicketFilter) -> Vec<TicketRow> {
    rows.iter().filter(|r| filter.matches(r)).cloned().collect()
}
