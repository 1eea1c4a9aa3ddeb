use chrono::NaiveDateTime;
use serde::Serialize;

pub const PRIORITIES: [&str; 4] = ["Low", "Medium", "High", "Urgent"];
pub const STATUSES: [&str; 3] = ["Open", "Pending", "Closed"];
pub const CHANNELS: [&str; 4] = ["Email", "Phone", "Chat", "Web"];
pub const TEAMS: [&str; 4] = ["Tier 1", "Tier 2", "Escalations", "Billing"];

/// Id of "Closed" in the status lookup (third row, 1-based).
pub const CLOSED_STATUS_ID: i64 = 3;

/// Storage format for `created_at` / `resolved_at` columns.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub team: String,
}

#[derive(Debug, Clone)]
pub struct Dimensions {
    pub priorities: Vec<LookupRow>,
    pub statuses: Vec<LookupRow>,
    pub channels: Vec<LookupRow>,
    pub customers: Vec<Customer>,
    pub agents: Vec<Agent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: i64,
    pub customer_id: i64,
    pub agent_id: i64,
    pub priority_id: i64,
    pub status_id: i64,
    pub channel_id: i64,
    pub created_at: NaiveDateTime,
    pub resolved_at: Option<NaiveDateTime>,
    pub sla_met: bool,
    pub reopened: bool,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub dimensions: Dimensions,
    pub tickets: Vec<Ticket>,
}

/// Denormalized ticket: one row of the joined view used for filtering and display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRow {
    pub ticket_id: i64,
    pub customer_name: String,
    pub agent_name: String,
    pub priority: String,
    pub status: String,
    pub channel: String,
    pub created_at: NaiveDateTime,
    pub resolved_at: Option<NaiveDateTime>,
    pub sla_met: bool,
    pub reopened: bool,
}

impl TicketRow {
    /// Hours between creation and resolution, `None` while unresolved.
    pub fn resolution_hours(&self) -> Option<f64> {
        self.resolved_at
            .map(|r| r.signed_duration_since(self.created_at).num_seconds() as f64 / 3600.0)
    }
}
