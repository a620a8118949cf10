//! FARS - accident summaries and state maps from the command line.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fars::logging::enable_logging;
use fars::{parse_state_code, parse_year, FarsConfig, MapOutcome, MapPlotter, Summarizer};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "fars", version, about = "FARS accident summaries and state maps", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
    #[arg(long, help = "JSON config file")]
    config: Option<PathBuf>,
    #[arg(long, help = "Directory with accident_<YEAR>.csv.bz2 files")]
    data_dir: Option<PathBuf>,
    #[arg(long, help = "Directory rendered maps are written to")]
    output_dir: Option<PathBuf>,
    #[arg(long = "log-level", help = "Overrides RUST_LOG")]
    log_level: Option<LevelFilter>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Count accidents per month for each year")]
    Summary {
        #[arg(required = true)]
        years: Vec<String>,
    },
    #[command(about = "Plot one state's accidents for a year")]
    Map { state: String, year: String },
}

fn main() -> Result<()> {
    let args = Args::parse();
    enable_logging(args.log_level);

    let mut config = match &args.config {
        Some(path) => FarsConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => FarsConfig::default(),
    };
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }

    match args.command {
        Command::Summary { years } => {
            let years = years
                .iter()
                .map(|y| parse_year(y))
                .collect::<fars::Result<Vec<_>>>()?;
            let summary = Summarizer::summarize_years(&config.loader(), &years)?;
            println!("{}", summary);
        }
        Command::Map { state, year } => {
            let state = parse_state_code(&state)?;
            let year = parse_year(&year)?;
            let plotter = MapPlotter::new(config.loader(), &config.output_dir, config.map.clone());
            match plotter.map_state(state, year)? {
                MapOutcome::Plotted { path, points, .. } => {
                    println!("{} accidents plotted to {}", points, path.display());
                }
                MapOutcome::NoAccidents => println!("no accidents to plot"),
                MapOutcome::NoCoordinates { skipped } => {
                    println!("no accidents with known coordinates ({} skipped)", skipped);
                }
            }
        }
    }

    Ok(())
}
