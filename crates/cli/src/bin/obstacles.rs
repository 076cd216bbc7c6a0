use anyhow::Context;
use clap::Parser;
use procedure_surfaces::build_request;
use procedure_surfaces::config::{load_obstacles, load_request};
use procedure_surfaces::export::table::{TableFormat, write_assessment};
use procedure_surfaces::export::writer_for_path;
use std::path::{Path, PathBuf};
use tracing::info;

#[path = "shared/logging.rs"]
mod logging;

/// Select the obstacles under a procedure surface and report their penetration.
#[derive(Parser, Debug)]
#[command(author, version, about = "Obstacle assessment against procedure surfaces")]
struct Cli {
    /// Request file (YAML list or TOML) or a directory of request files
    #[arg(long)]
    request: PathBuf,

    /// Which request to run when several are loaded (0-based)
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Obstacle CSV with id, x, y, elevation columns in the request's planar frame
    #[arg(long)]
    obstacles: PathBuf,

    /// Only list obstacles that penetrate their controlling surface
    #[arg(long)]
    penetrating: bool,

    /// Write comma-separated values instead of tab-separated
    #[arg(long)]
    csv: bool,

    /// Output file ('-' for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    let request = load_request(&cli.request, cli.index)
        .with_context(|| format!("loading {}", cli.request.display()))?;
    let obstacles = load_obstacles(&cli.obstacles)
        .with_context(|| format!("loading {}", cli.obstacles.display()))?;

    let feature = build_request(&request)?;
    let mut assessments = feature.assess_obstacles(&obstacles)?;
    if cli.penetrating {
        assessments.retain(|a| a.penetrates());
    }

    let format = if cli.csv { TableFormat::Csv } else { TableFormat::Tsv };
    let mut writer = writer_for_path(&cli.output)?;
    write_assessment(&mut *writer, &assessments, format)?;
    writer.flush()?;

    if cli.output != Path::new("-") {
        info!(
            calculation = %feature.calculation_type(),
            rows = assessments.len(),
            path = %cli.output.display(),
            "assessment written"
        );
    }
    Ok(())
}
