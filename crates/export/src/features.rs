//! GeoJSON-style feature collections in the computation's projected frame.
//!
//! Each exported part carries the calculation-type discriminator and the
//! serialized parameter record, so a stored layer can feed reports later.

use std::io::{Read, Write};

use ifp_core::{Geometry, ParameterEntry, ParameterRecord, PlanarPoint};
use serde::{Deserialize, Serialize};
use serde_json::to_writer_pretty;

use crate::ExportError;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: String,
    properties: Properties,
    geometry: FeatureGeometry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Properties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    surface: Option<String>,
    calculation_type: String,
    parameters: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum FeatureGeometry {
    LineString(Vec<Vec<f64>>),
    Polygon(Vec<Vec<Vec<f64>>>),
}

/// Feature read back from an exported collection, before schema validation.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFeature {
    pub calculation_type: String,
    pub surface: Option<String>,
    pub entries: Vec<ParameterEntry>,
}

/// Machine-readable form of a record: an ordered list of `{parameter, value, unit}`.
pub fn parameters_attribute(record: &ParameterRecord) -> Result<String, ExportError> {
    Ok(serde_json::to_string(record.entries())?)
}

/// One feature per line string or surface ring.
pub fn write_feature_collection(
    writer: &mut dyn Write,
    geometry: &Geometry,
    record: &ParameterRecord,
) -> Result<(), ExportError> {
    let parameters = parameters_attribute(record)?;
    let calculation_type = record.calculation_type().name().to_string();
    let feature = |surface: Option<String>, geometry: FeatureGeometry| Feature {
        kind: "Feature".to_string(),
        properties: Properties {
            surface,
            calculation_type: calculation_type.clone(),
            parameters: parameters.clone(),
        },
        geometry,
    };

    let features = match geometry {
        Geometry::LineString(points) => vec![feature(None, FeatureGeometry::LineString(coordinates(points)))],
        Geometry::Surfaces(rings) => rings
            .iter()
            .map(|ring| {
                feature(
                    Some(ring.name().to_string()),
                    FeatureGeometry::Polygon(vec![coordinates(ring.points())]),
                )
            })
            .collect(),
    };

    to_writer_pretty(
        &mut *writer,
        &FeatureCollection {
            kind: "FeatureCollection".to_string(),
            features,
        },
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Read the discriminator and parameter attribute of every feature in a collection.
pub fn read_stored_features<R: Read>(reader: R) -> Result<Vec<StoredFeature>, ExportError> {
    let collection: FeatureCollection = serde_json::from_reader(reader)?;
    collection
        .features
        .into_iter()
        .map(|feature| -> Result<StoredFeature, ExportError> {
            Ok(StoredFeature {
                entries: serde_json::from_str(&feature.properties.parameters)?,
                calculation_type: feature.properties.calculation_type,
                surface: feature.properties.surface,
            })
        })
        .collect()
}

fn coordinates(points: &[PlanarPoint]) -> Vec<Vec<f64>> {
    points
        .iter()
        .map(|p| match p.z {
            Some(z) => vec![p.x, p.y, z],
            None => vec![p.x, p.y],
        })
        .collect()
}
