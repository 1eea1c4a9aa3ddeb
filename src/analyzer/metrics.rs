//! Dashboard metrics: scalar KPIs and grouped counts over a filtered ticket set.
use std::collections::HashMap;

use serde::Serialize;

use super::stats::{flag_percent, mean, median, round2};
use super::temporal::{weekly_volume, WeeklyVolume};
use crate::types::TicketRow;

// ─── Data Structures ─────────────────────────────────────────────────────────

/// Scalar KPIs. `None` means "not applicable" for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKpi {
    pub total_tickets: usize,
    pub median_resolution_hours: Option<f64>,
    pub sla_breach_percent: Option<f64>,
    pub reopen_rate_percent: Option<f64>,
}

/// KPI card values as shown to a user: two decimals, `N/A` when undefined.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiDisplay {
    pub total_tickets: String,
    pub median_resolution_hours: String,
    pub sla_breach_percent: String,
    pub reopen_rate_percent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountItem {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub kpi: DashboardKpi,
    pub weekly_volume: Vec<WeeklyVolume>,
    pub counts_by_priority: Vec<CountItem>,
    pub counts_by_agent: Vec<CountItem>,
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

const NOT_APPLICABLE: &str = "N/A";

fn display_number(v: Option<f64>) -> String {
    v.map(|v| format!("{:.2}", round2(v)))
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

fn display_percent(v: Option<f64>) -> String {
    v.map(|v| format!("{:.2}%", round2(v)))
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

impl DashboardKpi {
    pub fn display(&self) -> KpiDisplay {
        KpiDisplay {
            total_tickets: self.total_tickets.to_string(),
            median_resolution_hours: display_number(self.median_resolution_hours),
            sla_breach_percent: display_percent(self.sla_breach_percent),
            reopen_rate_percent: display_percent(self.reopen_rate_percent),
        }
    }
}

// ─── Builders ────────────────────────────────────────────────────────────────

pub fn compute_kpi(rows: &[TicketRow]) -> DashboardKpi {
    let resolution_hours: Vec<f64> = rows.iter().filter_map(|r| r.resolution_hours()).collect();
    let sla_flags: Vec<f64> = rows.iter().map(|r| if r.sla_met { 1.0 } else { 0.0 }).collect();

    DashboardKpi {
        total_tickets: rows.len(),
        median_resolution_hours: median(&resolution_hours),
        sla_breach_percent: mean(&sla_flags).map(|m| 100.0 * (1.0 - m)),
        reopen_rate_percent: flag_percent(rows.iter().map(|r| r.reopened)),
    }
}

/// Counts per label, most frequent first; ties ordered by label.
pub fn counts_by<F>(rows: &[TicketRow], key: F) -> Vec<CountItem>
where
    F: Fn(&TicketRow) -> &str,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(key(row)).or_insert(0) += 1;
    }

    let mut items: Vec<CountItem> = counts
        .into_iter()
        .map(|(label, count)| CountItem {
            label: label.to_string(),
            count,
        })
        .collect();
    items.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    items
}

pub fn compute_metrics(rows: &[TicketRow]) -> DashboardMetrics {
    DashboardMetrics {
        kpi: compute_kpi(rows),
        weekly_volume: weekly_volume(rows),
        counts_by_priority: counts_by(rows, |r| r.priority.as_str()),
        counts_by_agent: counts_by(rows, |r| r.agent_name.as_str()),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDateTime};

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn ticket(id: i64, agent: &str, priority: &str, delay_hours: Option<i64>, reopened: bool) -> TicketRow {
        let created_at = ts("2025-03-04 09:00:00") + Duration::hours(id);
        let resolved_at = delay_hours.map(|h| created_at + Duration::hours(h));
        TicketRow {
            ticket_id: id,
            customer_name: "Customer".into(),
            agent_name: agent.into(),
            priority: priority.into(),
            status: if resolved_at.is_some() { "Closed" } else { "Open" }.into(),
            channel: "Chat".into(),
            created_at,
            resolved_at,
            sla_met: delay_hours.map_or(false, |h| h <= 24),
            reopened,
        }
    }

    #[test]
    fn test_two_closed_one_open_scenario() {
        let rows = vec![
            ticket(1, "Alice", "High", Some(10), false),
            ticket(2, "Bob", "Low", Some(30), false),
            ticket(3, "Alice", "Low", None, false),
        ];
        let kpi = compute_kpi(&rows);

        assert_eq!(kpi.total_tickets, 3);
        assert_eq!(kpi.median_resolution_hours, Some(20.0));
        let breach = kpi.sla_breach_percent.unwrap();
        assert!((breach - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(kpi.reopen_rate_percent, Some(0.0));

        let shown = kpi.display();
        assert_eq!(shown.total_tickets, "3");
        assert_eq!(shown.median_resolution_hours, "20.00");
        assert_eq!(shown.sla_breach_percent, "66.67%");
        assert_eq!(shown.reopen_rate_percent, "0.00%");
    }

    #[test]
    fn test_empty_set_is_not_applicable() {
        let kpi = compute_kpi(&[]);
        assert_eq!(kpi.total_tickets, 0);
        assert_eq!(kpi.median_resolution_hours, None);
        assert_eq!(kpi.sla_breach_percent, None);
        assert_eq!(kpi.reopen_rate_percent, None);

        let shown = kpi.display();
        assert_eq!(shown.median_resolution_hours, "N/A");
        assert_eq!(shown.sla_breach_percent, "N/A");
        assert_eq!(shown.reopen_rate_percent, "N/A");
    }

    #[test]
    fn test_only_unresolved_tickets() {
        let rows = vec![ticket(1, "Alice", "High", None, false), ticket(2, "Bob", "Low", None, false)];
        let kpi = compute_kpi(&rows);
        assert_eq!(kpi.median_resolution_hours, None);
        assert_eq!(kpi.sla_breach_percent, Some(100.0));
        assert_eq!(kpi.reopen_rate_percent, Some(0.0));
    }

    #[test]
    fn test_reopen_rate_over_all_rows() {
        let rows = vec![
            ticket(1, "Alice", "High", Some(5), true),
            ticket(2, "Alice", "High", Some(5), false),
            ticket(3, "Alice", "High", None, false),
            ticket(4, "Alice", "High", None, false),
        ];
        assert_eq!(compute_kpi(&rows).reopen_rate_percent, Some(25.0));
    }

    #[test]
    fn test_counts_sorted_by_frequency_then_label() {
        let rows = vec![
            ticket(1, "Bob", "Low", None, false),
            ticket(2, "Alice", "High", None, false),
            ticket(3, "Alice", "Low", None, false),
            ticket(4, "Charlie", "Urgent", None, false),
        ];
        let by_agent = counts_by(&rows, |r| r.agent_name.as_str());
        assert_eq!(
            by_agent,
            vec![
                CountItem { label: "Alice".into(), count: 2 },
                CountItem { label: "Bob".into(), count: 1 },
                CountItem { label: "Charlie".into(), count: 1 },
            ]
        );

        let by_priority = counts_by(&rows, |r| r.priority.as_str());
        assert_eq!(by_priority[0], CountItem { label: "Low".into(), count: 2 });
        let total: usize = by_priority.iter().map(|c| c.count).sum();
        assert_eq!(total, rows.len());
    }

    #[test]
    fn test_compute_metrics_single_week() {
        let rows: Vec<TicketRow> = (1..=5).map(|i| ticket(i, "Alice", "Low", None, false)).collect();
        let metrics = compute_metrics(&rows);
        assert_eq!(metrics.weekly_volume.len(), 1);
        assert_eq!(metrics.weekly_volume[0].count, 5);
        assert_eq!(metrics.counts_by_agent.len(), 1);
        assert_eq!(metrics.kpi.total_tickets, 5);
    }
}
