use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "trendscope",
    version,
    about = "Technology trend scoring, momentum and anomaly detection"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a snapshot file or a directory of snapshots
    Score(ScoreCommand),
    /// Run momentum analysis over a {date, score} series
    Momentum(MomentumCommand),
    /// Validate configuration and print the effective weight tables
    Check(CheckCommand),
}

#[derive(Args)]
pub struct ScoreCommand {
    pub path: PathBuf,
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
    /// Directory holding trendscope.toml (defaults to the current directory)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "notable")]
    pub min_severity: MinSeverity,
}

#[derive(Args)]
pub struct MomentumCommand {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct CheckCommand {
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MinSeverity {
    Info,
    Notable,
    Significant,
    Critical,
}
