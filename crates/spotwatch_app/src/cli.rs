use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use spotwatch_logging::LogDestination;

/// Follow spot-detection jobs from the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "spotwatch", version, about, long_about = None)]
pub struct Cli {
    /// RON config file (defaults to ./spotwatch.ron when present).
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Server base URL, e.g. http://localhost:5000/.
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Where log output goes.
    #[arg(long, global = true, value_enum, default_value_t = LogTarget::Terminal)]
    pub log: LogTarget,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Follow one job's progress until it finishes.
    Watch {
        job_id: String,
        /// Do not seed the display from the status endpoint.
        #[arg(long)]
        no_snapshot: bool,
    },
    /// Check image files against the upload rules.
    Check {
        #[arg(required = true, value_hint = ValueHint::FilePath)]
        files: Vec<PathBuf>,
    },
    /// Ask the server to cancel a job.
    Cancel { job_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
        }
    }
}
