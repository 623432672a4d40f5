//! Plot generation pipeline
//!
//! The `plot` subcommand is one linear pass:
//! 1. Resolve the run directory from the run name and validate it.
//! 2. Load the five-column data table.
//! 3. Render the nine diagnostic plots beside the input.
//!
//! There is no recovery path; every failure is fatal and user-facing.

use std::path::{Path, PathBuf};

use crate::config::PlotConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::plot;
use crate::run::RunDir;

/// Run the plot pipeline for a named run located beside the executable
pub fn run_plot(name: &str, cfg: &PlotConfig) -> Result<Vec<PathBuf>> {
    let run = RunDir::locate(name)?;
    plot_run(&run, cfg)
}

/// Run the plot pipeline for a run under an explicit base directory
pub fn run_plot_at(base: &Path, name: &str, cfg: &PlotConfig) -> Result<Vec<PathBuf>> {
    let run = RunDir::at(base, name);
    plot_run(&run, cfg)
}

fn plot_run(run: &RunDir, cfg: &PlotConfig) -> Result<Vec<PathBuf>> {
    println!("[1/3] Locating run data...");
    run.validate()?;
    println!("  Run directory: {}", run.dir().display());
    println!("  Data file: {}", run.data_file().display());

    println!("\n[2/3] Loading data table...");
    let data = Dataset::load(&run.data_file())?;
    println!("  {} samples x 5 columns", data.len());

    println!(
        "\n[3/3] Rendering {} plots ({}x{} px)...",
        plot::PLOT_SUFFIXES.len(),
        cfg.width,
        cfg.height
    );
    let written = plot::render_all(run, &data, cfg)?;

    println!(
        "\n✓ {} plots written to {}",
        written.len(),
        run.dir().display()
    );
    Ok(written)
}
