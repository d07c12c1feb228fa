//! fff-slicer CLI - slice an ASCII STL file into G-code.
//!
//! Usage:
//!   fff-slicer <input.stl> [-p N] [-i N] [-t X] [-o output.g]

use anyhow::{Context, Result};
use clap::Parser;
use fff_slicer::{load_stl, SliceOptions, SlicePipeline};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, LevelFilter};
use std::path::PathBuf;

/// Slice an ASCII STL file into G-code for a fused-filament printer.
#[derive(Parser, Debug)]
#[command(name = "fff-slicer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input STL file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output G-code file
    #[arg(short, long, value_name = "OUTPUT", default_value = "sampleGcode.g")]
    output: PathBuf,

    /// Slice configuration file (JSON format)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Number of perimeter layers (must be > 0; out-of-range keeps the default 2)
    #[arg(short, long, value_name = "N")]
    perimeter: Option<i64>,

    /// Infill density in percent (0-100; out-of-range keeps the default 20)
    #[arg(short, long, value_name = "N")]
    infill: Option<i64>,

    /// Layer thickness in mm (must be > 0; out-of-range keeps the default 0.2)
    #[arg(short, long, value_name = "X")]
    thickness: Option<f64>,

    /// Number of threads to use (0 = auto)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.debug {
        LevelFilter::Debug
    } else if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    // Set thread count if specified
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to initialize thread pool")?;
    }

    // Build options: config file first, CLI flags override.
    let mut options = match &cli.config {
        Some(path) => {
            info!("Loading options from: {}", path.display());
            SliceOptions::from_file(path).context("Failed to load options file")?
        }
        None => SliceOptions::default(),
    };
    if let Some(p) = cli.perimeter {
        options = options.perimeter_layers(p);
    }
    if let Some(i) = cli.infill {
        options = options.infill_percent(i);
    }
    if let Some(t) = cli.thickness {
        options = options.thickness(t);
    }

    info!("Configuration:");
    info!("  Perimeter layers: {}", options.perimeter_layers);
    info!("  Infill density: {}%", options.infill_percent);
    info!("  Layer thickness: {} mm", options.thickness);

    info!("Loading STL file: {}", cli.input.display());
    let mesh = load_stl(&cli.input)
        .with_context(|| format!("Failed to load STL file: {}", cli.input.display()))?;
    info!("Mesh loaded: {} facets", mesh.facet_count());

    // Create progress bar
    let progress = ProgressBar::new(100);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    progress.set_message("Slicing...");

    let pipeline = SlicePipeline::new(options);
    let gcode = pipeline
        .process_with_callback(&mesh, |stage, stage_progress| {
            let (base, range) = match stage {
                "slicing" => (0u64, 30.0),
                "gcode" => (30u64, 65.0),
                _ => (0u64, 30.0),
            };
            progress.set_position(base + (stage_progress * range) as u64);
            progress.set_message(match stage {
                "slicing" => "Slicing layers...",
                "gcode" => "Generating G-code...",
                _ => "Processing...",
            });
        })
        .context("Failed to slice mesh")?;

    progress.set_message("Writing output...");
    progress.set_position(95);

    gcode
        .write_to_file(&cli.output)
        .context("Failed to write G-code file")?;

    progress.set_position(100);
    progress.finish_with_message("Done!");

    println!();
    println!("Slicing complete!");
    println!("  Output: {}", cli.output.display());
    println!("  Layers: {}", gcode.stats.layer_count);
    println!(
        "  Filament used: {:.2} m",
        gcode.stats.filament_used_mm / 1000.0
    );
    println!("  G-code lines: {}", gcode.line_count());

    Ok(())
}
