use crate::core::aggregator::SortOrder;
use crate::export::ExportFormat;
use crate::models::date_filter::FilterPreset;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rVenue
/// CLI application to track a venue's tables, orders, tournaments and expenses with SQLite
#[derive(Parser)]
#[command(
    name = "rvenue",
    version = env!("CARGO_PKG_VERSION"),
    about = "A venue activity tracker: work-day revenue, profit and sessions using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Start, end or inspect the work session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Show activity grouped by work day
    Days {
        /// Sort order of the work days (default from config)
        #[arg(long, value_enum)]
        order: Option<SortOrder>,

        /// Show every record under its work day
        #[arg(long)]
        details: bool,
    },

    /// Resolve the current date filter to a concrete interval
    Range {
        /// Preset to resolve (default: the persisted one)
        #[arg(long, value_enum, conflicts_with = "day")]
        preset: Option<FilterPreset>,

        /// Anchor day for the custom preset (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        from: Option<String>,

        /// End anchor for the custom preset (YYYY-MM-DD, currently not used)
        #[arg(long, value_name = "DATE")]
        to: Option<String>,

        /// Bounds of a past day widened to the activity recorded on it
        #[arg(long, value_name = "DATE")]
        day: Option<String>,

        /// Persist the preset as the current date filter
        #[arg(long, requires = "preset")]
        save: bool,
    },

    /// Record venue activity
    Add {
        #[command(subcommand)]
        target: AddTarget,
    },

    /// Toggle the paid flag of a table session
    Paid { id: i64 },

    /// Close (or reopen) an order session
    Close {
        id: i64,

        #[arg(long)]
        reopen: bool,
    },

    /// Delete a record by stream and id
    Del {
        /// table, order, item, tournament, expense or product
        stream: String,

        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Export work days in various formats
    Export {
        /// Export format: csv, json
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Database information
    Db {
        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Open a new work session with the cash float in the drawer
    Start {
        #[arg(long, default_value_t = 0.0)]
        cash: f64,
    },
    /// Close the active work session
    End,
    /// Show the current session state and duration
    Status,
}

#[derive(Subcommand)]
pub enum AddTarget {
    /// A table rental
    Table {
        #[arg(long)]
        label: String,
        /// Start (YYYY-MM-DD HH:MM, default: now)
        #[arg(long)]
        start: Option<String>,
        /// End (YYYY-MM-DD HH:MM); omit for a running session
        #[arg(long)]
        end: Option<String>,
        #[arg(long, default_value_t = 0.0)]
        revenue: f64,
        #[arg(long)]
        paid: bool,
    },
    /// A customer order tab
    Order {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        closed: bool,
    },
    /// A line on an existing order
    Item {
        #[arg(long)]
        order: i64,
        #[arg(long)]
        product: i64,
        #[arg(long, default_value_t = 1)]
        qty: i64,
        #[arg(long)]
        sell: f64,
        /// Unit cost; omit to use the inventory cost
        #[arg(long)]
        cost: Option<f64>,
    },
    /// A tournament
    Tournament {
        #[arg(long)]
        name: String,
        #[arg(long)]
        at: Option<String>,
        #[arg(long, default_value_t = 0.0)]
        fee: f64,
    },
    /// A participant of an existing tournament
    Participant {
        #[arg(long)]
        tournament: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        paid: bool,
    },
    /// A prize of an existing tournament
    Prize {
        #[arg(long)]
        tournament: i64,
        #[arg(long)]
        amount: f64,
    },
    /// An expense
    Expense {
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        amount: f64,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "other")]
        category: String,
    },
    /// A product in the inventory (inserted or replaced)
    Product {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0.0)]
        cost: f64,
    },
}
