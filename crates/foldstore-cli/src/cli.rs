use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "foldstore - inspect, re-profile and remap persisted RNA fold records.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize the sequence, oligo context and cached folds of a record.
    Inspect(InspectArgs),
    /// Recompute the melting profile of a record from its cached folds.
    Melt(MeltArgs),
    /// Print the index map for a new oligo order.
    Remap(RemapArgs),
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to a persisted fold record (JSON).
    #[arg(required = true, value_name = "RECORD")]
    pub record: PathBuf,
}

/// Arguments for the `melt` subcommand.
#[derive(Args, Debug)]
pub struct MeltArgs {
    /// Path to a persisted fold record (JSON).
    #[arg(required = true, value_name = "RECORD")]
    pub record: PathBuf,

    /// Profile the pseudoknotted fold partition instead of the nested one.
    #[arg(long)]
    pub pseudoknots: bool,

    /// Write the updated record to this path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write the melt curve as CSV.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Write the reference dot plot as CSV.
    #[arg(long, value_name = "PATH")]
    pub dot_plot: Option<PathBuf>,

    /// Path to a profiling configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S profiling.sweep-end=77
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `remap` subcommand.
#[derive(Args, Debug)]
pub struct RemapArgs {
    /// Path to a persisted fold record (JSON).
    #[arg(required = true, value_name = "RECORD")]
    pub record: PathBuf,

    /// New slot of each oligo, in current order (e.g. `1,0`). Defaults to the identity.
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub order: Option<Vec<usize>>,
}
