use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use present_packer::parse;
use present_packer::render;
use present_packer::solver::Solver;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "present_packer",
    about = "Count the regions that can hold all of their required presents"
)]
struct Cli {
    /// Puzzle input: numbered shape blocks followed by WxH region lines
    input: PathBuf,

    /// Search budget per region in milliseconds
    #[arg(long, default_value_t = 1000, conflicts_with = "exhaustive")]
    timeout_ms: u64,

    /// Search every region to completion, however long it takes
    #[arg(long)]
    exhaustive: bool,

    /// Show the packing of each feasible region
    #[arg(long)]
    layout: bool,

    /// Print the full per-region report as JSON
    #[arg(long)]
    json: bool,

    /// Diagnostics level on stderr: error, warn, info, debug, or trace
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(cli.log_level)
        .init();

    let puzzle = parse::read_input(&cli.input).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    tracing::info!(
        shapes = puzzle.shapes.len(),
        regions = puzzle.regions.len(),
        skipped = puzzle.skipped.len(),
        "parsed input"
    );

    let timeout = (!cli.exhaustive).then(|| Duration::from_millis(cli.timeout_ms));
    let solver = Solver::with_shapes(&puzzle.shapes, timeout);

    let start = Instant::now();
    let summary = solver.solve_all(&puzzle.regions);
    tracing::info!(
        elapsed_us = start.elapsed().as_micros() as u64,
        feasible = summary.feasible,
        timed_out = summary.timed_out(),
        "Part 1"
    );

    if cli.json {
        let json = serde_json::to_string_pretty(&summary).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
        println!("{}", json);
        return;
    }

    if cli.layout {
        for (i, report) in summary.regions.iter().enumerate() {
            if !report.outcome.is_feasible() {
                continue;
            }
            println!("Region {} ({}x{}):", i + 1, report.width, report.height);
            print!(
                "{}",
                render::render_region(report.width, report.height, &report.placements, &solver)
            );
            println!();
        }
    }

    println!("Part 1: {}", summary.feasible);
}
