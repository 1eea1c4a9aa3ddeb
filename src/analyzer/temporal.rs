use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::types::TicketRow;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyVolume {
    pub week_ending: NaiveDate,
    pub week_key: String,
    pub count: usize,
}

/// Sunday closing the Monday-to-Sunday week that contains `date`.
pub fn week_ending(date: NaiveDate) -> NaiveDate {
    let days_to_sunday = 6 - date.weekday().num_days_from_monday() as i64;
    date + Duration::days(days_to_sunday)
}

/// ISO week key, e.g. `2026-W02`.
pub fn week_key(date: NaiveDate) -> String {
    let iw = date.iso_week();
    format!("{:04}-W{:02}", iw.year(), iw.week())
}

/// Tickets per calendar week, chronological. Weeks without tickets are omitted.
pub fn weekly_volume(rows: &[TicketRow]) -> Vec<WeeklyVolume> {
    let mut buckets: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for row in rows {
        *buckets.entry(week_ending(row.created_at.date())).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(week_ending, count)| WeeklyVolume {
            week_ending,
            week_key: week_key(week_ending),
            count,
        })
        .collect()
}
