//! Parameter record schemas and the assembler that fills them.
//!
//! Each calculation type has one static schema. Row order and labels never
//! depend on input values; optional rows are dropped when their scalar is absent.

use ifp_core::{
    CalculationType, DerivedScalarSet, InputError, ParameterEntry, ParameterRecord, Quantity,
    ScalarInputSet, ensure_finite,
};

use crate::EngineError;
use crate::keys;

/// Where a row's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSource {
    /// Quantity from the input set, shown in the unit the host supplied.
    Input { precision: usize },
    /// Text label from the input set; rendered without a unit.
    InputText,
    Derived { precision: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaRow {
    pub label: &'static str,
    pub key: &'static str,
    pub source: RowSource,
    pub required: bool,
}

#[derive(Debug)]
pub struct Schema {
    pub calculation_type: CalculationType,
    pub rows: &'static [SchemaRow],
}

impl Schema {
    pub fn labels(&self) -> Vec<&'static str> {
        self.rows.iter().map(|r| r.label).collect()
    }
}

const fn input(label: &'static str, key: &'static str, precision: usize) -> SchemaRow {
    SchemaRow {
        label,
        key,
        source: RowSource::Input { precision },
        required: true,
    }
}

const fn text(label: &'static str, key: &'static str) -> SchemaRow {
    SchemaRow {
        label,
        key,
        source: RowSource::InputText,
        required: true,
    }
}

const fn derived(label: &'static str, key: &'static str, precision: usize) -> SchemaRow {
    SchemaRow {
        label,
        key,
        source: RowSource::Derived { precision },
        required: true,
    }
}

const fn optional(row: SchemaRow) -> SchemaRow {
    SchemaRow {
        required: false,
        ..row
    }
}

static WIND_SPIRAL: Schema = Schema {
    calculation_type: CalculationType::WindSpiral,
    rows: &[
        input("Aerodrome Elevation", keys::AERODROME_ELEVATION, 2),
        input("Temperature Reference", keys::TEMPERATURE_REFERENCE, 2),
        derived("ISA Calculated", keys::ISA_TEMPERATURE, 2),
        derived("ISA Variation", keys::ISA_DEVIATION, 2),
        input("IAS", keys::IAS, 2),
        input("Altitude", keys::ALTITUDE, 2),
        input("Bank Angle", keys::BANK_ANGLE, 2),
        input("Wind Speed", keys::WIND_SPEED, 2),
        text("Turn Direction", keys::TURN_DIRECTION),
    ],
};

static BASIC_ILS: Schema = Schema {
    calculation_type: CalculationType::IlsBasicSurfaces,
    rows: &[
        input("Threshold Elevation", keys::THRESHOLD_ELEVATION, 2),
        text("Approach Category", keys::APPROACH_CATEGORY),
        input("Runway Bearing", keys::RUNWAY_BEARING, 2),
        optional(input("Threshold Displacement", keys::THRESHOLD_DISPLACEMENT, 2)),
        derived("Inner Edge Half Width", keys::INNER_HALF_WIDTH, 1),
        derived("Approach Divergence", keys::APPROACH_DIVERGENCE, 1),
        derived("First Approach Section Slope", keys::APPROACH_FIRST_SLOPE, 2),
        derived("Second Approach Section Slope", keys::APPROACH_SECOND_SLOPE, 2),
        derived("Missed Approach Slope", keys::MISSED_APPROACH_SLOPE, 2),
        derived("Transitional Slope", keys::TRANSITIONAL_SLOPE, 1),
    ],
};

static OAS_CAT_I: Schema = Schema {
    calculation_type: CalculationType::IlsOasCategoryI,
    rows: &[
        input("Threshold Elevation", keys::THRESHOLD_ELEVATION, 2),
        text("Approach Category", keys::APPROACH_CATEGORY),
        input("Runway Bearing", keys::RUNWAY_BEARING, 2),
        optional(input("Threshold Displacement", keys::THRESHOLD_DISPLACEMENT, 2)),
        text("OAS Type", keys::OAS_TYPE),
        optional(input("FAP Elevation", keys::FAP_ELEVATION, 2)),
        optional(input("MOC Intermediate", keys::MOC_INTERMEDIATE, 2)),
        optional(derived("OAS Cut-off Height", keys::OAS_CUTOFF_HEIGHT, 2)),
    ],
};

static VSS_STRAIGHT: Schema = Schema {
    calculation_type: CalculationType::Vss,
    rows: &[
        input("Threshold Elevation", keys::THRESHOLD_ELEVATION, 2),
        input("Runway Bearing", keys::RUNWAY_BEARING, 2),
        optional(input("Threshold Displacement", keys::THRESHOLD_DISPLACEMENT, 2)),
        input("Runway Width", keys::RUNWAY_WIDTH, 2),
        input("Strip Width", keys::STRIP_WIDTH, 2),
        input("OCH", keys::OCH, 2),
        input("RDH", keys::RDH, 2),
        input("VPA", keys::VPA, 2),
        optional(input("Eye-to-Wheel Height", keys::EYE_TO_WHEEL_HEIGHT, 2)),
        derived("VSS Slope Angle", keys::VSS_SLOPE, 2),
        derived("VSS Length", keys::VSS_LENGTH, 2),
        derived("Decision Point Distance", keys::DECISION_POINT_DISTANCE, 2),
    ],
};

static VSS_LOC: Schema = Schema {
    calculation_type: CalculationType::VssLoc,
    rows: &[
        input("Threshold Elevation", keys::THRESHOLD_ELEVATION, 2),
        input("Runway Bearing", keys::RUNWAY_BEARING, 2),
        optional(input("Threshold Displacement", keys::THRESHOLD_DISPLACEMENT, 2)),
        input("Runway Width", keys::RUNWAY_WIDTH, 2),
        input("OCH", keys::OCH, 2),
        input("RDH", keys::RDH, 2),
        input("VPA", keys::VPA, 2),
        optional(input("Eye-to-Wheel Height", keys::EYE_TO_WHEEL_HEIGHT, 2)),
        derived("VSS Slope Angle", keys::VSS_SLOPE, 2),
        derived("VSS Length", keys::VSS_LENGTH, 2),
        derived("Decision Point Distance", keys::DECISION_POINT_DISTANCE, 2),
        derived("OCS Length", keys::OCS_LENGTH, 2),
    ],
};

pub fn schema_for(calculation: CalculationType) -> &'static Schema {
    match calculation {
        CalculationType::WindSpiral => &WIND_SPIRAL,
        CalculationType::IlsBasicSurfaces => &BASIC_ILS,
        CalculationType::IlsOasCategoryI => &OAS_CAT_I,
        CalculationType::Vss => &VSS_STRAIGHT,
        CalculationType::VssLoc => &VSS_LOC,
    }
}

/// Schema for a stored discriminator; unknown names are a [`EngineError::SchemaMismatch`].
pub fn schema_for_name(name: &str) -> Result<&'static Schema, EngineError> {
    CalculationType::from_name(name)
        .map(schema_for)
        .ok_or_else(|| EngineError::SchemaMismatch(format!("no schema registered for calculation type '{name}'")))
}

/// Fill the schema of `calculation` from the scalars a builder consumed and produced.
pub fn assemble(
    calculation: CalculationType,
    inputs: &ScalarInputSet,
    derived: &DerivedScalarSet,
) -> Result<ParameterRecord, EngineError> {
    let schema = schema_for(calculation);
    let mut entries = Vec::with_capacity(schema.rows.len());
    for row in schema.rows {
        let entry = match row.source {
            RowSource::Input { precision } => inputs
                .quantity(row.key)?
                .map(|q| quantity_entry(row, q, precision))
                .transpose()?,
            RowSource::InputText => inputs
                .optional_text(row.key)?
                .map(|text| ParameterEntry::new(row.label, text.trim(), "")),
            RowSource::Derived { precision } => derived
                .get(row.key)
                .map(|q| quantity_entry(row, q, precision))
                .transpose()?,
        };
        match entry {
            Some(entry) => entries.push(entry),
            None if row.required => return Err(InputError::Missing(row.key.to_string()).into()),
            None => {}
        }
    }
    Ok(ParameterRecord::new(calculation, entries))
}

/// Rebuild a record read from storage, checking it against the registered schema.
///
/// Labels must appear in schema order and every required label must be present.
pub fn validate_record(calculation_name: &str, entries: Vec<ParameterEntry>) -> Result<ParameterRecord, EngineError> {
    let schema = schema_for_name(calculation_name)?;
    let mut rows = schema.rows.iter();
    for entry in &entries {
        let mut matched = false;
        for row in rows.by_ref() {
            if row.label == entry.parameter {
                matched = true;
                break;
            }
            if row.required {
                return Err(EngineError::SchemaMismatch(format!(
                    "{calculation_name} record is missing '{}' before '{}'",
                    row.label, entry.parameter
                )));
            }
        }
        if !matched {
            return Err(EngineError::SchemaMismatch(format!(
                "{calculation_name} record has unexpected or out-of-order row '{}'",
                entry.parameter
            )));
        }
    }
    if let Some(row) = rows.find(|row| row.required) {
        return Err(EngineError::SchemaMismatch(format!(
            "{calculation_name} record is missing '{}'",
            row.label
        )));
    }
    Ok(ParameterRecord::new(schema.calculation_type, entries))
}

fn quantity_entry(row: &SchemaRow, q: Quantity, precision: usize) -> Result<ParameterEntry, InputError> {
    let value = ensure_finite(row.key, q.value)?;
    Ok(ParameterEntry::new(row.label, format!("{value:.precision$}"), q.unit.symbol()))
}
