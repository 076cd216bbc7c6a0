//! KML export with absolute altitudes.
//!
//! Surfaces are written with `altitudeMode` `absolute` and an explicit altitude on
//! every vertex; a surface vertex without elevation is an error rather than
//! something to clamp to terrain. Planar metres are mapped to longitude/latitude
//! through a caller-chosen [`LocalTangentPlane`].

use std::io::Write;

use ifp_core::{Geometry, InputError, ParameterRecord, PlanarPoint, ensure_finite};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::ExportError;

/// Mean Earth radius (m).
const EARTH_RADIUS_M: f64 = 6_371_008.8;
const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Equirectangular mapping about a planar point whose geographic position is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTangentPlane {
    origin: PlanarPoint,
    origin_lon_deg: f64,
    origin_lat_deg: f64,
}

impl LocalTangentPlane {
    /// The anchor latitude must lie strictly between the poles, where a metre
    /// east still maps to a finite change in longitude.
    pub fn new(origin: PlanarPoint, origin_lon_deg: f64, origin_lat_deg: f64) -> Result<Self, InputError> {
        ensure_finite("anchor_x", origin.x)?;
        ensure_finite("anchor_y", origin.y)?;
        let origin_lon_deg = ensure_finite("origin_lon", origin_lon_deg)?;
        let origin_lat_deg = ensure_finite("origin_lat", origin_lat_deg)?;
        if origin_lat_deg.abs() >= 90.0 {
            return Err(InputError::out_of_range("origin_lat", origin_lat_deg, "(-90, 90) °"));
        }
        Ok(Self {
            origin,
            origin_lon_deg,
            origin_lat_deg,
        })
    }

    /// `(longitude, latitude)` in degrees.
    pub fn to_lon_lat(&self, point: &PlanarPoint) -> (f64, f64) {
        let dx = point.x - self.origin.x;
        let dy = point.y - self.origin.y;
        let lat = self.origin_lat_deg + (dy / EARTH_RADIUS_M).to_degrees();
        let lon = self.origin_lon_deg + (dx / (EARTH_RADIUS_M * self.origin_lat_deg.to_radians().cos())).to_degrees();
        (lon, lat)
    }
}

pub fn write_kml(
    writer: &mut dyn Write,
    name: &str,
    geometry: &Geometry,
    record: &ParameterRecord,
    plane: &LocalTangentPlane,
) -> Result<(), ExportError> {
    if let Geometry::Surfaces(rings) = geometry {
        for ring in rings {
            if let Some(index) = ring.points().iter().position(|p| p.z.is_none()) {
                return Err(ExportError::MissingElevation {
                    part: ring.name().to_string(),
                    index,
                });
            }
        }
    }

    let mut kml = KmlWriter {
        xml: Writer::new_with_indent(writer, b' ', 2),
    };
    kml.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    kml.event(Event::Start(BytesStart::new("kml").with_attributes([("xmlns", KML_NAMESPACE)])))?;
    kml.open("Document")?;
    kml.text_element("name", name)?;
    kml.styles()?;

    let description = describe(record);
    match geometry {
        Geometry::LineString(points) => {
            let altitude_mode = if points.iter().all(|p| p.z.is_some()) {
                "absolute"
            } else {
                "clampToGround"
            };
            kml.open("Placemark")?;
            kml.text_element("name", record.calculation_type().name())?;
            kml.text_element("description", &description)?;
            kml.text_element("styleUrl", "#path")?;
            kml.open("LineString")?;
            kml.text_element("altitudeMode", altitude_mode)?;
            kml.text_element("coordinates", &coordinates(points, plane))?;
            kml.close("LineString")?;
            kml.close("Placemark")?;
        }
        Geometry::Surfaces(rings) => {
            for ring in rings {
                kml.open("Placemark")?;
                kml.text_element("name", ring.name())?;
                kml.text_element("description", &description)?;
                kml.text_element("styleUrl", "#surface")?;
                kml.open("Polygon")?;
                kml.text_element("altitudeMode", "absolute")?;
                kml.open("outerBoundaryIs")?;
                kml.open("LinearRing")?;
                kml.text_element("coordinates", &coordinates(ring.points(), plane))?;
                kml.close("LinearRing")?;
                kml.close("outerBoundaryIs")?;
                kml.close("Polygon")?;
                kml.close("Placemark")?;
            }
        }
    }

    kml.close("Document")?;
    kml.close("kml")?;
    kml.xml.get_mut().write_all(b"\n")?;
    Ok(())
}

struct KmlWriter<W: Write> {
    xml: Writer<W>,
}

impl<W: Write> KmlWriter<W> {
    fn event(&mut self, event: Event<'_>) -> Result<(), ExportError> {
        self.xml.write_event(event).map_err(|e| ExportError::Xml(e.to_string()))
    }

    fn open(&mut self, tag: &str) -> Result<(), ExportError> {
        self.event(Event::Start(BytesStart::new(tag)))
    }

    fn close(&mut self, tag: &str) -> Result<(), ExportError> {
        self.event(Event::End(BytesEnd::new(tag)))
    }

    /// `<tag>text</tag>`, with the text escaped.
    fn text_element(&mut self, tag: &str, text: &str) -> Result<(), ExportError> {
        self.open(tag)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.close(tag)
    }

    /// Red surfaces, yellow paths.
    fn styles(&mut self) -> Result<(), ExportError> {
        self.event(Event::Start(BytesStart::new("Style").with_attributes([("id", "surface")])))?;
        self.open("LineStyle")?;
        self.text_element("color", "ff0000ff")?;
        self.text_element("width", "2")?;
        self.close("LineStyle")?;
        self.open("PolyStyle")?;
        self.text_element("color", "7f0000ff")?;
        self.text_element("fill", "1")?;
        self.text_element("outline", "1")?;
        self.close("PolyStyle")?;
        self.close("Style")?;

        self.event(Event::Start(BytesStart::new("Style").with_attributes([("id", "path")])))?;
        self.open("LineStyle")?;
        self.text_element("color", "ff00ffff")?;
        self.text_element("width", "3")?;
        self.close("LineStyle")?;
        self.close("Style")
    }
}

fn coordinates(points: &[PlanarPoint], plane: &LocalTangentPlane) -> String {
    points
        .iter()
        .map(|p| {
            let (lon, lat) = plane.to_lon_lat(p);
            match p.z {
                Some(z) => format!("{lon:.9},{lat:.9},{z:.3}"),
                None => format!("{lon:.9},{lat:.9}"),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe(record: &ParameterRecord) -> String {
    record
        .entries()
        .iter()
        .map(|e| format!("{}: {} {}", e.parameter, e.value, e.unit).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
