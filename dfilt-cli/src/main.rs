use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dfilt::io::{format_matrix, parse_arcs};
use dfilt::signal::filter::{chain_from_json, DigitalFilterChain, FilterKind, PadType};
use dfilt::signal::traits::DigitalFilter;
use log::info;
use rayon::prelude::*;

mod cli;

use cli::{Cli, Command, FilterArgs, ResponseArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    match cli.command {
        Command::Filter(args) => run_filter(args),
        Command::Response(args) => run_response(args),
        Command::Kinds => run_kinds(),
    }
}

fn load_chain(path: &Path) -> Result<DigitalFilterChain> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading filter configuration {}", path.display()))?;
    let chain = chain_from_json(&text)
        .with_context(|| format!("building filter chain from {}", path.display()))?;
    info!("loaded chain of {} filters", chain.len());
    Ok(chain)
}

fn run_filter(args: FilterArgs) -> Result<()> {
    let chain = load_chain(&args.config)?;

    let text = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading input {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading input from stdin")?;
            text
        }
    };
    let arcs = parse_arcs(&text).context("parsing input matrix")?;
    if arcs.is_empty() {
        bail!("input contains no data rows");
    }
    info!("filtering {} arcs", arcs.len());

    let filtered = arcs
        .par_iter()
        .enumerate()
        .map(|(n, arc)| {
            chain
                .filter(arc.view())
                .with_context(|| format!("filtering arc {} ({} rows)", n + 1, arc.nrows()))
        })
        .collect::<Result<Vec<_>>>()?;

    let rendered = filtered
        .iter()
        .map(format_matrix)
        .collect::<Vec<_>>()
        .join("\n");
    match &args.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("writing output {}", path.display()))?,
        None => io::stdout()
            .write_all(rendered.as_bytes())
            .context("writing output to stdout")?,
    }
    Ok(())
}

fn run_response(args: ResponseArgs) -> Result<()> {
    if args.length == 0 {
        bail!("response length must be positive");
    }
    if !(args.sampling > 0.0) {
        bail!("sampling interval must be positive");
    }
    let chain = load_chain(&args.config)?;
    let response = chain
        .frequency_response(args.length)
        .context("evaluating frequency response")?;

    let mut out = io::stdout().lock();
    writeln!(out, "# frequency amplitude phase real imaginary")?;
    for (k, h) in response.iter().enumerate() {
        let frequency = k as f64 / (args.length as f64 * args.sampling);
        writeln!(
            out,
            "{frequency:.10e} {:.10e} {:.10e} {:.10e} {:.10e}",
            h.norm(),
            h.arg(),
            h.re,
            h.im
        )?;
    }
    Ok(())
}

fn run_kinds() -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "filter types:")?;
    for kind in FilterKind::ALL {
        writeln!(out, "  {kind}")?;
    }
    writeln!(out, "pad types:")?;
    for pad in PadType::ALL {
        writeln!(out, "  {pad}")?;
    }
    Ok(())
}
