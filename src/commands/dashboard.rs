use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analyzer::{
    apply_filter, compute_metrics, DashboardMetrics, DateRange, FilterOptions, KpiDisplay,
    TicketFilter,
};
use crate::config::{get_config_from_db, AppConfig};
use crate::db::queries;
use crate::error::AppError;
use crate::state::{DbAccess, Store};
use crate::types::TicketRow;

/// Filter selection coming from the presentation layer. `None` keeps the
/// dashboard default (full date span, every value); `Some(vec![])` is an
/// explicit empty selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRequest {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub priorities: Option<Vec<String>>,
    pub agents: Option<Vec<String>>,
    pub statuses: Option<Vec<String>>,
}

impl DashboardRequest {
    pub fn resolve(&self, options: &FilterOptions) -> TicketFilter {
        let defaults = TicketFilter::select_all(options);
        let start = self.date_from.or(options.min_date);
        let end = self.date_to.or(options.max_date);
        let date_range = match (start, end) {
            (None, None) => None,
            (start, end) => Some(DateRange {
                start: start.unwrap_or(NaiveDate::MIN),
                end: end.unwrap_or(NaiveDate::MAX),
            }),
        };

        TicketFilter {
            date_range,
            priorities: self
                .priorities
                .as_ref()
                .map(|v| v.iter().cloned().collect())
                .unwrap_or(defaults.priorities),
            agents: self
                .agents
                .as_ref()
                .map(|v| v.iter().cloned().collect())
                .unwrap_or(defaults.agents),
            statuses: self
                .statuses
                .as_ref()
                .map(|v| v.iter().cloned().collect())
                .unwrap_or(defaults.statuses),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub filter: TicketFilter,
    pub options: FilterOptions,
    pub kpi_display: KpiDisplay,
    pub metrics: DashboardMetrics,
    pub filtered_rows: usize,
    pub assumptions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<TicketRow>>,
}

/// Result of one load → filter pass, shared by the dashboard and the exports.
pub(crate) struct FilteredView {
    pub filter: TicketFilter,
    pub options: FilterOptions,
    pub rows: Vec<TicketRow>,
    pub config: AppConfig,
}

pub(crate) fn load_filtered_view(
    store: &Store,
    request: &DashboardRequest,
) -> Result<FilteredView, AppError> {
    store.db(|conn| {
        let all_rows = queries::load_ticket_view(conn)?;
        let options = queries::load_filter_options(conn)?;
        let config = get_config_from_db(conn).unwrap_or_else(|e| {
            log::warn!("Config unavailable ({}), using defaults", e);
            AppConfig::default()
        });

        let filter = request.resolve(&options);
        let rows = apply_filter(&all_rows, &filter);
        log::debug!("Filter kept {} of {} tickets", rows.len(), all_rows.len());

        Ok(FilteredView {
            filter,
            options,
            rows,
            config,
        })
    })
}

pub fn build_dashboard(
    store: &Store,
    request: &DashboardRequest,
    include_rows: bool,
) -> Result<DashboardPayload, AppError> {
    let view = load_filtered_view(store, request)?;
    let metrics = compute_metrics(&view.rows);

    Ok(DashboardPayload {
        kpi_display: metrics.kpi.display(),
        filtered_rows: view.rows.len(),
        assumptions: view.config.assumptions(),
        filter: view.filter,
        options: view.options,
        metrics,
        rows: include_rows.then_some(view.rows),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn options() -> FilterOptions {
        FilterOptions {
            priorities: vec!["High".into(), "Low".into()],
            agents: vec!["Alice".into()],
            statuses: vec!["Closed".into(), "Open".into()],
            min_date: Some(d("2025-01-01")),
            max_date: Some(d("2025-04-30")),
        }
    }

    #[test]
    fn test_default_request_selects_all() {
        let filter = DashboardRequest::default().resolve(&options());
        assert_eq!(filter, TicketFilter::select_all(&options()));
    }

    #[test]
    fn test_explicit_empty_selection_is_kept() {
        let request = DashboardRequest {
            priorities: Some(vec![]),
            ..Default::default()
        };
        let filter = request.resolve(&options());
        assert!(filter.priorities.is_empty());
        assert_eq!(filter.agents.len(), 1);
    }

    #[test]
    fn test_partial_date_range_uses_dataset_bounds() {
        let request = DashboardRequest {
            date_from: Some(d("2025-02-01")),
            ..Default::default()
        };
        let range = request.resolve(&options()).date_range.unwrap();
        assert_eq!(range.start, d("2025-02-01"));
        assert_eq!(range.end, d("2025-04-30"));
    }

    #[test]
    fn test_date_bound_on_empty_dataset_is_open_ended() {
        let mut opts = options();
        opts.min_date = None;
        opts.max_date = None;
        let request = DashboardRequest {
            date_to: Some(d("2025-02-01")),
            ..Default::default()
        };
        let range = request.resolve(&opts).date_range.unwrap();
        assert_eq!(range.start, NaiveDate::MIN);
        assert_eq!(range.end, d("2025-02-01"));
    }

    #[test]
    fn test_missing_store_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("nothing-here.db"));
        let err = build_dashboard(&store, &DashboardRequest::default(), false).unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable { .. }));
    }
}
