use clap::{Parser, ValueEnum};
use procedure_surfaces::atmosphere::isa_conditions;
use procedure_surfaces::core::{Quantity, Unit};

#[path = "shared/logging.rs"]
mod logging;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ElevationUnit {
    Ft,
    M,
}

/// ISA temperature and deviation at an aerodrome elevation.
#[derive(Parser, Debug)]
#[command(author, version, about = "ISA calculator")]
struct Cli {
    /// Aerodrome elevation
    #[arg(long, allow_negative_numbers = true)]
    elevation: f64,

    /// Unit of the elevation
    #[arg(long, value_enum, default_value_t = ElevationUnit::Ft)]
    unit: ElevationUnit,

    /// Reference (measured) temperature in °C
    #[arg(long, allow_negative_numbers = true)]
    temperature: f64,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    let unit = match cli.unit {
        ElevationUnit::Ft => Unit::Feet,
        ElevationUnit::M => Unit::Meters,
    };
    let conditions = isa_conditions(Quantity::new(cli.elevation, unit), Quantity::celsius(cli.temperature))?;

    println!("Elevation        : {}", conditions.elevation);
    println!("Reference temp.  : {:.5} °C", conditions.reference_temperature.value);
    println!("ISA temperature  : {:.5} °C", conditions.isa_temperature.value);
    println!("ISA variation    : {:.5} °C", conditions.deviation.value);
    Ok(())
}
