//! Command-line tools for level files and chunk plans.
//!
//! Usage:
//! - `fuka-export inspect <file>`
//! - `fuka-export rewrite <input> <output>`
//! - `fuka-export chunks --points N [--chunks C]`
//! - `fuka-export grid --output <file> --min X --max X --points N`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use fuka_export::io::{LevelFile, read_level_file, write_level_file};
use fuka_export::types::Grid;
use fuka_export::{ChunkPlan, SchedulerConfig};

#[derive(Parser, Debug)]
#[command(name = "fuka-export")]
#[command(about = "Inspect and prepare level files for initial data export")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the variables of a level file
    Inspect {
        /// Level file to read
        file: PathBuf,
    },

    /// Read a level file and write it back out
    Rewrite {
        /// Level file to read
        input: PathBuf,
        /// Destination
        output: PathBuf,
    },

    /// Print how a grid of N points is split into chunks
    Chunks {
        /// Number of grid points
        #[arg(long)]
        points: usize,

        /// Number of chunks (defaults to the worker count)
        #[arg(long)]
        chunks: Option<usize>,
    },

    /// Write a uniform grid along the x axis
    Grid {
        /// Output level file
        #[arg(long)]
        output: PathBuf,

        /// First x coordinate
        #[arg(long, allow_hyphen_values = true)]
        min: f64,

        /// Last x coordinate
        #[arg(long, allow_hyphen_values = true)]
        max: f64,

        /// Number of points
        #[arg(long)]
        points: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Inspect { file } => inspect(&file),
        Command::Rewrite { input, output } => rewrite(&input, &output),
        Command::Chunks { points, chunks } => print_chunks(points, chunks),
        Command::Grid {
            output,
            min,
            max,
            points,
        } => write_grid(&output, min, max, points),
    }
}

fn inspect(file: &Path) -> Result<()> {
    let level = read_level_file(file).with_context(|| format!("reading {}", file.display()))?;

    println!("{}: {} variables", file.display(), level.len());
    for (name, values) in level.iter() {
        println!("  {:<12} length = {}", name, values.len());
    }
    Ok(())
}

fn rewrite(input: &Path, output: &Path) -> Result<()> {
    let level = read_level_file(input).with_context(|| format!("reading {}", input.display()))?;
    write_level_file(output, &level).with_context(|| format!("writing {}", output.display()))?;

    info!(input = %input.display(), output = %output.display(), variables = level.len(), "rewrote level file");
    Ok(())
}

fn print_chunks(points: usize, chunks: Option<usize>) -> Result<()> {
    let mut config = SchedulerConfig::new();
    if let Some(n) = chunks {
        config = config.with_chunks(n);
    }

    let plan = ChunkPlan::new(points, config.chunk_count())?;
    println!("{} points in {} chunks", plan.n_points(), plan.n_chunks());
    for chunk in plan.chunks() {
        let note = if chunk.is_empty() { "  (skipped)" } else { "" };
        println!("  {:<10} offset = {:<10} len = {}{}", chunk.index.to_string(), chunk.offset, chunk.len, note);
    }
    Ok(())
}

fn write_grid(output: &Path, min: f64, max: f64, points: usize) -> Result<()> {
    let grid = Grid::line_x(min, max, points);
    write_level_file(output, &LevelFile::from_grid(&grid))
        .with_context(|| format!("writing {}", output.display()))?;

    info!(output = %output.display(), points, min, max, "wrote grid");
    Ok(())
}
