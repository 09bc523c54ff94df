use crate::export::ExportFormat;
use crate::models::SortOption;
use clap::{Parser, Subcommand};

/// Command-line interface definition for opsboard
/// Terminal dashboard for scheduled ops and operator attendance
#[derive(Parser)]
#[command(
    name = "opsboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Browse today's ops, search and sort their operators, and record check-ins",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or a shared attendance file)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and database
    Init,

    /// Inspect or upgrade the configuration file
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(long = "check", help = "List fields missing from the configuration file")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their defaults")]
        migrate: bool,
    },

    /// Download the ops list and keep it as the local snapshot
    Fetch {
        #[arg(long, help = "Fetch from this URL instead of the configured endpoint")]
        endpoint: Option<String>,
    },

    /// List ops with their operators
    List {
        #[arg(long, short, help = "Match op title, public id or operator name")]
        search: Option<String>,

        #[arg(long, value_enum, help = "Operator order inside each op")]
        sort: Option<SortOption>,

        #[arg(long, value_name = "FILE", help = "Read ops from a JSON file")]
        file: Option<String>,

        #[arg(long, help = "Fetch a fresh snapshot before listing")]
        refresh: bool,

        #[arg(long, help = "Print the projected ops as JSON")]
        json: bool,
    },

    /// Check an operator in
    Checkin {
        op_id: String,
        operator_id: String,

        #[arg(long, help = "Note stored with the check-in")]
        note: Option<String>,

        #[arg(long, value_name = "FILE", help = "Validate against ops in this JSON file")]
        file: Option<String>,
    },

    /// Check an operator out
    Checkout {
        op_id: String,
        operator_id: String,

        #[arg(long, help = "Note stored with the check-out")]
        note: Option<String>,

        #[arg(long, value_name = "FILE", help = "Validate against ops in this JSON file")]
        file: Option<String>,
    },

    /// Show or export today's attendance
    Attendance {
        #[arg(long, help = "Print the attendance map as JSON")]
        json: bool,

        #[arg(long, value_name = "FILE", help = "Export attendance to a file")]
        export: Option<String>,

        #[arg(long, value_enum, default_value = "csv", requires = "export")]
        format: ExportFormat,

        #[arg(long, short = 'f', help = "Overwrite the export file without asking")]
        force: bool,
    },

    /// Keep today's attendance on screen, following other sessions' changes
    Watch {
        #[arg(long, value_name = "SECONDS", help = "Refresh period (default from config)")]
        interval: Option<u64>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long, default_value_t = 20, help = "Number of rows to print")]
        limit: usize,
    },
}
