use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "platescore - statistical scoring and hit identification for arrayed high-throughput screening data.",
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
    /// Score simulated noisy screen data with every workflow of a scoring
    /// set and write performance metrics.
    Score(ScoreArgs),
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Directory holding the input files; metrics are written here too.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub working_dir: PathBuf,

    /// File name (within the working directory) of the scoring-set
    /// definition in TOML format.
    #[arg(short, long, required = true, value_name = "FILE")]
    pub scoring_set: String,

    /// File name (within the working directory) of the ground-truth hit
    /// layout.
    #[arg(short, long, required = true, value_name = "FILE")]
    pub true_hits: String,

    /// File name(s) (within the working directory) of the noisy screen data,
    /// named 'screen<id>_hitset<id>_noiseset<id>...'.
    #[arg(required = true, value_name = "DATA_FILE")]
    pub data_files: Vec<String>,
}
