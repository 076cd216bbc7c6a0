//! Export helpers for computed procedure geometry and parameter records.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

pub mod features;
pub mod kml;
pub mod table;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode table: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode KML: {0}")]
    Xml(String),
    #[error("vertex {index} of '{part}' has no elevation; 3D export needs z on every vertex")]
    MissingElevation { part: String, index: usize },
    #[error("malformed parameter table: {0}")]
    MalformedTable(String),
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}
