//! `PARAMETER | VALUE | UNIT` tables with a calculation-specific heading.

use std::io::{Read, Write};

use ifp_core::{ObstacleAssessment, ParameterEntry, ParameterRecord};

use crate::ExportError;

const COLUMNS: [&str; 3] = ["PARAMETER", "VALUE", "UNIT"];
const ASSESSMENT_HEADING: &str = "OBSTACLE ASSESSMENT";
const ASSESSMENT_COLUMNS: [&str; 7] = ["ID", "X", "Y", "ELEVATION", "SURFACE", "SURFACE ELEVATION", "PENETRATION"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Tab separated, for pasting into spreadsheets and documents.
    Tsv,
    Csv,
}

impl TableFormat {
    fn delimiter(self) -> u8 {
        match self {
            TableFormat::Tsv => b'\t',
            TableFormat::Csv => b',',
        }
    }
}

/// Table read back from text.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub heading: String,
    pub entries: Vec<ParameterEntry>,
}

pub fn write_table(writer: &mut dyn Write, record: &ParameterRecord, format: TableFormat) -> Result<(), ExportError> {
    writeln!(writer, "{}", record.calculation_type().report_heading())?;
    let mut table = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_writer(&mut *writer);
    table.write_record(COLUMNS)?;
    for entry in record.entries() {
        table.write_record([&entry.parameter, &entry.value, &entry.unit])?;
    }
    table.flush()?;
    Ok(())
}

/// One row per selected obstacle; metres with two decimals, blank where the
/// surface carries no elevation.
pub fn write_assessment(
    writer: &mut dyn Write,
    assessments: &[ObstacleAssessment],
    format: TableFormat,
) -> Result<(), ExportError> {
    writeln!(writer, "{ASSESSMENT_HEADING}")?;
    let mut table = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_writer(&mut *writer);
    table.write_record(ASSESSMENT_COLUMNS)?;
    let metres = |v: Option<f64>| v.map(|v| format!("{v:.2}")).unwrap_or_default();
    for a in assessments {
        table.write_record([
            a.obstacle.id.clone(),
            metres(Some(a.obstacle.x)),
            metres(Some(a.obstacle.y)),
            metres(Some(a.obstacle.elevation)),
            a.surface.clone(),
            metres(a.surface_elevation),
            metres(a.penetration),
        ])?;
    }
    table.flush()?;
    Ok(())
}

pub fn render_table(record: &ParameterRecord, format: TableFormat) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_table(&mut buffer, record, format)?;
    String::from_utf8(buffer).map_err(|err| ExportError::MalformedTable(err.to_string()))
}

pub fn parse_table<R: Read>(mut reader: R, format: TableFormat) -> Result<ParsedTable, ExportError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let (heading, body) = text
        .split_once('\n')
        .ok_or_else(|| ExportError::MalformedTable("missing heading line".to_string()))?;

    let mut table = csv::ReaderBuilder::new()
        .delimiter(format.delimiter())
        .has_headers(true)
        .from_reader(body.as_bytes());
    let header = table.headers()?.clone();
    if header.iter().collect::<Vec<_>>() != COLUMNS {
        return Err(ExportError::MalformedTable(format!(
            "unexpected columns {:?}",
            header.iter().collect::<Vec<_>>()
        )));
    }

    let mut entries = Vec::new();
    for row in table.records() {
        let row = row?;
        let field = |i: usize| row.get(i).unwrap_or_default();
        entries.push(ParameterEntry::new(field(0), field(1), field(2)));
    }
    Ok(ParsedTable {
        heading: heading.trim_end_matches('\r').to_string(),
        entries,
    })
}
