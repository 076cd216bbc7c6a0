//! Calculation requests and engine settings.
//!
//! A YAML file holds a sequence of requests, a TOML file holds one request, and a
//! directory is read file by file in sorted order.

use std::fs::File;
use std::path::{Path, PathBuf};

use ifp_core::{Obstacle, ScalarInputSet};
use ifp_core::constants::DEFAULT_SPIRAL_STEP_DEG;
use serde::Deserialize;
use thiserror::Error;

/// One calculation to run: which builder, with which inputs.
#[derive(Debug, Deserialize, Clone)]
pub struct CalculationRequest {
    /// Calculation type display name (`"Wind Spiral"`) or slug (`"wind_spiral"`).
    pub calculation: String,
    #[serde(default)]
    pub label: Option<String>,
    pub inputs: ScalarInputSet,
    #[serde(default)]
    pub settings: EngineSettings,
}

/// Tunables passed explicitly to every builder.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    #[serde(default = "default_spiral_step")]
    pub spiral_step_deg: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            spiral_step_deg: DEFAULT_SPIRAL_STEP_DEG,
        }
    }
}

fn default_spiral_step() -> f64 {
    DEFAULT_SPIRAL_STEP_DEG
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read request file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("no calculation requests found in {0}")]
    Empty(PathBuf),
    #[error("failed to read obstacle table: {0}")]
    Csv(#[from] csv::Error),
}

/// Load obstacles from a CSV file with an `id,x,y,elevation` header (`elev` is
/// accepted for the last column). Coordinates are in the request's planar frame.
pub fn load_obstacles<P: AsRef<Path>>(path: P) -> Result<Vec<Obstacle>, ConfigError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let obstacles = reader.deserialize().collect::<Result<Vec<Obstacle>, _>>()?;
    Ok(obstacles)
}

/// Load every request from a file or directory.
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<CalculationRequest>, ConfigError> {
    let path = path.as_ref();
    let requests: Vec<CalculationRequest> = load_records(path)?;
    if requests.is_empty() {
        return Err(ConfigError::Empty(path.to_path_buf()));
    }
    Ok(requests)
}

/// Load the request at `index` (0-based) from a file or directory.
pub fn load_request<P: AsRef<Path>>(path: P, index: usize) -> Result<CalculationRequest, ConfigError> {
    let path = path.as_ref();
    load_requests(path)?
        .into_iter()
        .nth(index)
        .ok_or_else(|| ConfigError::Empty(path.to_path_buf()))
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if has_extension(path, &["toml"]) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| has_extension(path, &["toml", "yaml", "yml"]))
        .collect();
    entries.sort();
    for path in entries {
        records.extend(load_records::<T, _>(&path)?);
    }
    Ok(records)
}

fn has_extension(path: &Path, wanted: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| wanted.contains(&ext))
        .unwrap_or(false)
}
