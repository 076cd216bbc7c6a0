use anyhow::{Context, anyhow};
use chrono::Local;
use clap::{Parser, ValueEnum};
use procedure_surfaces::build_request;
use procedure_surfaces::config::load_request;
use procedure_surfaces::core::PlanarPoint;
use procedure_surfaces::export::kml::{LocalTangentPlane, write_kml};
use procedure_surfaces::export::table::{TableFormat, write_table};
use procedure_surfaces::export::{features, writer_for_path};
use std::path::{Path, PathBuf};
use tracing::info;

#[path = "shared/logging.rs"]
mod logging;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Geojson,
    Kml,
    Csv,
    Table,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Geojson => "geojson",
            Format::Kml => "kml",
            Format::Csv => "csv",
            Format::Table => "txt",
        }
    }
}

/// Build one procedure surface from a request file and export it.
#[derive(Parser, Debug)]
#[command(author, version, about = "Procedure surface builder")]
struct Cli {
    /// Request file (YAML list or TOML) or a directory of request files
    #[arg(long)]
    request: PathBuf,

    /// Which request to run when several are loaded (0-based)
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Geojson)]
    format: Format,

    /// Output file ('-' for stdout); defaults to <calculation>_<timestamp>.<ext>
    #[arg(long)]
    output: Option<PathBuf>,

    /// Spiral angular step in degrees (overrides the request settings)
    #[arg(long)]
    step: Option<f64>,

    /// Longitude of the anchor point, required for KML
    #[arg(long, allow_negative_numbers = true)]
    origin_lon: Option<f64>,

    /// Latitude of the anchor point, required for KML
    #[arg(long, allow_negative_numbers = true)]
    origin_lat: Option<f64>,

    /// Planar x of the anchor point (m)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    anchor_x: f64,

    /// Planar y of the anchor point (m)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    anchor_y: f64,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    let mut request = load_request(&cli.request, cli.index)
        .with_context(|| format!("loading {}", cli.request.display()))?;
    if let Some(step) = cli.step {
        request.settings.spiral_step_deg = step;
    }

    let plane = match (cli.format, cli.origin_lon, cli.origin_lat) {
        (Format::Kml, Some(lon), Some(lat)) => Some(
            LocalTangentPlane::new(PlanarPoint::new(cli.anchor_x, cli.anchor_y), lon, lat)
                .context("invalid KML anchor")?,
        ),
        (Format::Kml, _, _) => return Err(anyhow!("KML export needs --origin-lon and --origin-lat")),
        _ => None,
    };

    let feature = build_request(&request)?;
    let calculation = feature.calculation_type();
    let output = cli.output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "{}_{}.{}",
            calculation.slug(),
            Local::now().format("%Y%m%d_%H%M%S"),
            cli.format.extension()
        ))
    });

    let mut writer = writer_for_path(&output)?;
    match (cli.format, plane) {
        (Format::Kml, Some(plane)) => {
            let name = request.label.as_deref().unwrap_or(calculation.name());
            write_kml(&mut *writer, name, feature.geometry(), feature.parameters(), &plane)?
        }
        (Format::Csv, _) => write_table(&mut *writer, feature.parameters(), TableFormat::Csv)?,
        (Format::Table, _) => write_table(&mut *writer, feature.parameters(), TableFormat::Tsv)?,
        _ => features::write_feature_collection(&mut *writer, feature.geometry(), feature.parameters())?,
    }
    writer.flush()?;

    if output != Path::new("-") {
        info!(
            calculation = %calculation,
            vertices = feature.geometry().vertex_count(),
            path = %output.display(),
            "export written"
        );
    }
    Ok(())
}
