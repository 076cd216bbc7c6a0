use anyhow::{Context, anyhow};
use clap::Parser;
use procedure_surfaces::config::{EngineSettings, load_request};
use procedure_surfaces::core::ScalarInputSet;
use procedure_surfaces::export::features::{StoredFeature, read_stored_features};
use procedure_surfaces::export::table::{TableFormat, write_table};
use procedure_surfaces::report::ParameterOrigin;
use procedure_surfaces::{CalculationType, resolve_parameters};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;
use tracing::info;

#[path = "shared/logging.rs"]
mod logging;

/// Print the parameter table for a calculation, preferring a stored layer.
#[derive(Parser, Debug)]
#[command(author, version, about = "Parameter table for a computed procedure surface")]
struct Cli {
    /// Calculation type name or slug (e.g. "Wind Spiral", wind_spiral)
    #[arg(long)]
    calculation: String,

    /// Exported feature collection to read stored parameters from
    #[arg(long)]
    layer: Option<PathBuf>,

    /// Request file with the current inputs, used when the layer has no matching feature
    #[arg(long)]
    request: Option<PathBuf>,

    /// Which request to use when several are loaded (0-based)
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Comma-separated output instead of tab-separated
    #[arg(long, default_value_t = false)]
    csv: bool,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    let calculation = CalculationType::from_name(&cli.calculation)
        .ok_or_else(|| anyhow!("unknown calculation type '{}'", cli.calculation))?;

    let stored: Vec<StoredFeature> = match &cli.layer {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            read_stored_features(BufReader::new(file))?
        }
        None => Vec::new(),
    };
    let (inputs, settings) = match &cli.request {
        Some(path) => {
            let request = load_request(path, cli.index)?;
            (request.inputs, request.settings)
        }
        None => (ScalarInputSet::new(), EngineSettings::default()),
    };

    let resolved = resolve_parameters(calculation, stored.as_slice(), &inputs, &settings)?;
    info!(
        calculation = %calculation,
        from_layer = resolved.origin == ParameterOrigin::Layer,
        "parameters resolved"
    );

    let format = if cli.csv { TableFormat::Csv } else { TableFormat::Tsv };
    let mut out = std::io::stdout().lock();
    write_table(&mut out, &resolved.record, format)?;
    out.flush()?;
    Ok(())
}
