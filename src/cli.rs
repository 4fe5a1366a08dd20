//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Fetch and extract per-state weather data archives.
///
/// Downloads `<STATE>.tgz` from the public weather bucket into the data
/// directory, extracts it there, and reports the size of `<STATE>.parquet`.
#[derive(Parser, Debug)]
#[command(name = "weather-fetch")]
#[command(author, version, about)]
pub struct Args {
    /// Two-letter state or province code (e.g. CA, NY, ON; case-sensitive)
    #[arg(required_unless_present = "list_states")]
    pub state: Option<String>,

    /// Directory for the archive and extracted data [default: ../Data/Weather]
    #[arg(short = 'd', long)]
    pub data_dir: Option<PathBuf>,

    /// Archive file name [default: <STATE>.tgz]
    #[arg(long)]
    pub tarname: Option<String>,

    /// Extracted artifact file name [default: <STATE>.parquet]
    #[arg(long)]
    pub parquet_name: Option<String>,

    /// Archive host to fetch from instead of the public bucket
    #[arg(long)]
    pub base_url: Option<String>,

    /// Print the accepted state codes and exit
    #[arg(long, conflicts_with = "state")]
    pub list_states: bool,

    /// Print the fetch report as JSON instead of progress lines
    #[arg(long)]
    pub json: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
