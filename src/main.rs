use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{NaiveDate, Timelike};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use helpdesk_dashboard::commands::config::{get_config, set_config_value};
use helpdesk_dashboard::commands::dashboard::{build_dashboard, DashboardRequest};
use helpdesk_dashboard::commands::export::{export_agent_bundle, export_csv, export_xlsx};
use helpdesk_dashboard::commands::generate::run_generation;
use helpdesk_dashboard::{AppError, Store};

#[derive(Parser, Debug)]
#[command(version, about = "Help-desk ticket dataset generator and dashboard")]
struct Cli {
    /// Path of the SQLite dataset store
    #[arg(long, env = "HELPDESK_DB", default_value = "data/tickets.db", global = true)]
    db: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drop and rebuild the synthetic dataset
    Generate {
        /// Seed for a reproducible dataset
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print KPIs, weekly volume and counts for the filtered tickets as JSON
    Dashboard {
        #[command(flatten)]
        filter: FilterArgs,
        /// Include the filtered rows in the output
        #[arg(long)]
        rows: bool,
    },
    /// Write the filtered tickets to a file
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        #[command(flatten)]
        filter: FilterArgs,
        /// Output path (defaults to filtered_tickets.csv / .xlsx / tickets_by_agent.zip)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Inspect or change generation parameters
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportFormat {
    Csv,
    Xlsx,
    Agents,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    Show,
    Set { key: String, value: String },
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// First creation date to keep (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Last creation date to keep (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Priority to keep (repeatable); all when omitted
    #[arg(long = "priority")]
    priorities: Vec<String>,
    /// Agent to keep (repeatable); all when omitted
    #[arg(long = "agent")]
    agents: Vec<String>,
    /// Status to keep (repeatable); all when omitted
    #[arg(long = "status")]
    statuses: Vec<String>,
    /// Deselect every priority
    #[arg(long, conflicts_with = "priorities")]
    none_priority: bool,
    /// Deselect every agent
    #[arg(long, conflicts_with = "agents")]
    none_agent: bool,
    /// Deselect every status
    #[arg(long, conflicts_with = "statuses")]
    none_status: bool,
}

fn selection(values: Vec<String>, none: bool) -> Option<Vec<String>> {
    if none {
        Some(Vec::new())
    } else if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

impl From<FilterArgs> for DashboardRequest {
    fn from(args: FilterArgs) -> Self {
        DashboardRequest {
            date_from: args.from,
            date_to: args.to,
            priorities: selection(args.priorities, args.none_priority),
            agents: selection(args.agents, args.none_agent),
            statuses: selection(args.statuses, args.none_status),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<(), AppError> {
    let store = Store::new(cli.db);

    match cli.command {
        Command::Generate { seed } => {
            let now = chrono::Local::now().naive_local();
            let now = now.with_nanosecond(0).unwrap_or(now);
            print_json(&run_generation(&store, seed, now)?)
        }
        Command::Dashboard { filter, rows } => {
            print_json(&build_dashboard(&store, &filter.into(), rows)?)
        }
        Command::Export { format, filter, out } => {
            let request: DashboardRequest = filter.into();
            let result = match format {
                ExportFormat::Csv => export_csv(&store, &request, out)?,
                ExportFormat::Xlsx => export_xlsx(&store, &request, out)?,
                ExportFormat::Agents => export_agent_bundle(&store, &request, out)?,
            };
            print_json(&result)
        }
        Command::Config { action } => match action {
            ConfigAction::Show => print_json(&get_config(&store)?),
            ConfigAction::Set { key, value } => print_json(&set_config_value(&store, &key, &value)?),
        },
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
