pub mod filter;
pub mod metrics;
pub mod stats;
pub mod temporal;

pub use filter::{apply_filter, DateRange, FilterOptions, TicketFilter};
pub use metrics::{compute_kpi, compute_metrics, CountItem, DashboardKpi, DashboardMetrics, KpiDisplay};
pub use temporal::{weekly_volume, WeeklyVolume};
