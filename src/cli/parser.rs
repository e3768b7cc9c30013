use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rAttendance
#[derive(Parser)]
#[command(
    name = "rattendance",
    version = env!("CARGO_PKG_VERSION"),
    about = "Attendance sessions, breaks and break-policy usage, tracked in SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override configuration file path
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config_file: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Act as this employee (default: $USER)
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Use this local instant instead of now ("YYYY-MM-DD HH:MM")
    #[arg(global = true, long = "at", value_name = "DATETIME")]
    pub at: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Clock in: open a new attendance session
    In,

    /// Clock out: close the active session (ends an open break first)
    Out {
        /// Session to close (default: your active session)
        #[arg(long = "session")]
        session: Option<i64>,
    },

    /// Start or end a break in the active session
    Break {
        #[command(subcommand)]
        action: BreakAction,
    },

    /// Show the active session with live counters
    Status {
        /// Keep refreshing the counters until Ctrl-C or clock-out
        #[arg(long = "watch")]
        watch: bool,

        /// Stop watching after this many seconds
        #[arg(long = "seconds", requires = "watch")]
        seconds: Option<u64>,
    },

    /// Correct the times of a closed session (administrators only)
    Correct {
        /// Session id
        session: i64,

        /// New clock-in ("YYYY-MM-DD HH:MM")
        #[arg(long = "in")]
        clock_in: Option<String>,

        /// New clock-out ("YYYY-MM-DD HH:MM")
        #[arg(long = "out")]
        clock_out: Option<String>,
    },

    /// Session history and break usage per employee
    Report {
        /// week | month | all | YYYY | YYYY-MM | YYYY-MM-DD | start:end
        #[arg(long, short, default_value = "week")]
        period: String,

        /// Only this employee (administrators); others always see their own
        #[arg(long = "employee")]
        employee: Option<String>,

        /// List every break of every session
        #[arg(long = "details")]
        details: bool,
    },

    /// Delete a session and its breaks (administrators only)
    Delete {
        session: i64,

        /// Do not ask for confirmation
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Export sessions with break usage
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// week | month | all | YYYY | YYYY-MM | YYYY-MM-DD | start:end
        #[arg(long, short, default_value = "all")]
        period: String,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum BreakAction {
    /// Start a break: lunch, coffee, bathroom, personal or other
    Start {
        #[arg(value_name = "TYPE")]
        kind: String,
    },
    /// End the open break
    End,
}
