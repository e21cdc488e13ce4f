use clap::{Parser, Subcommand};

/// Command-line interface definition for biztrack
/// Backend CLI for SMS-driven mileage and work-hours tracking on SQLite
#[derive(Parser)]
#[command(
    name = "biztrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Ingest SMS business-tracking entries (mileage, hours) into SQLite and derive daily, weekly and pay-period aggregates",
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

    /// Inspect the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity and schema")]
        check: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Record one odometer reading and recompute the daily total
    Mileage {
        /// Person the reading belongs to
        name: String,

        /// Date of the reading (YYYY-MM-DD)
        date: String,

        /// Checkpoint: start, mid or end
        position: String,

        /// Odometer distance (non-negative)
        #[arg(allow_negative_numbers = true)]
        distance: f64,
    },

    /// Record (or overwrite) the daily hours report
    Hours {
        /// Date of the report (YYYY-MM-DD)
        date: String,

        /// Hours worked that day
        #[arg(allow_negative_numbers = true)]
        hours_today: f64,

        /// Running total for the week
        #[arg(allow_negative_numbers = true)]
        hours_week: f64,
    },

    /// Import the queued SMS logfile (one JSON entry per line)
    Import {
        /// Logfile path (defaults to the configured logfile)
        #[arg(long = "file", value_name = "FILE")]
        file: Option<String>,

        /// Do not clear the logfile after a successful import
        #[arg(long = "keep")]
        keep: bool,
    },

    /// Aggregate hours into a pay-period summary
    Rollup {
        /// Period start (YYYY-MM-DD); defaults to the current period
        /// derived from the configured anchor
        #[arg(long = "start", value_name = "DATE")]
        start: Option<String>,

        /// Period end (YYYY-MM-DD); defaults to start + period length - 1
        #[arg(long = "end", value_name = "DATE")]
        end: Option<String>,
    },

    /// Show mileage and hours summaries
    Report {
        /// Filter by person name
        #[arg(long = "name")]
        name: Option<String>,

        /// Show a single date (YYYY-MM-DD)
        #[arg(long = "date")]
        date: Option<String>,

        /// Window size in days when no date is given
        #[arg(long = "days", default_value_t = 7)]
        days: i64,
    },

    /// Run the HTTP ingestion endpoint for the SMS gateway
    Serve {
        /// Listen address
        #[arg(long = "addr", default_value = "0.0.0.0:10000")]
        addr: String,
    },
}
