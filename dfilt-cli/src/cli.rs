use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dfilt",
    version,
    about = "Apply digital filter chains to multi-column time series",
    long_about = "Apply a JSON-configured digital filter chain to whitespace separated time series.\n\
                  Blank lines separate independent arcs, which are filtered in parallel."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Filter the arcs of a matrix file
    Filter(FilterArgs),
    /// Print the frequency response of a filter chain
    Response(ResponseArgs),
    /// List filter types and padding policies
    Kinds,
}

#[derive(Args)]
pub struct FilterArgs {
    /// JSON filter chain description
    #[arg(short, long)]
    pub config: PathBuf,

    /// Input matrix, one epoch per line (stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ResponseArgs {
    /// JSON filter chain description
    #[arg(short, long)]
    pub config: PathBuf,

    /// DFT length the response is evaluated for
    #[arg(short, long, default_value_t = 1024)]
    pub length: usize,

    /// Sampling interval, scales the frequency column
    #[arg(short, long, default_value_t = 1.0)]
    pub sampling: f64,
}
