use std::ops::{Add, Mul, Neg, Sub};

use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{Area, Coord, Intersects, Line, LineString, Polygon, TriangulateEarcut};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::units::normalize_bearing;

/// Segments shorter than this are treated as collapsed (m).
const LENGTH_EPSILON_M: f64 = 1e-9;
/// Rings enclosing less than this are treated as degenerate (m²).
const AREA_EPSILON_M2: f64 = 1e-6;
/// Barycentric slack when locating a point on a triangle edge.
const BARYCENTRIC_EPSILON: f64 = 1e-9;

/// Planar vector in the projected frame: x east, y north.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector along a grid bearing (degrees clockwise from north).
    pub fn from_bearing(bearing_deg: f64) -> Self {
        let (sin, cos) = bearing_deg.to_radians().sin_cos();
        Self::new(sin, cos)
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Grid bearing of the vector in `[0, 360)` degrees.
    pub fn bearing_deg(self) -> f64 {
        normalize_bearing(self.x.atan2(self.y).to_degrees())
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

/// Point in the computation's projected frame (metres), with optional absolute elevation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl PlanarPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub const fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    #[inline]
    pub fn xy(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Shift horizontally, keeping the elevation.
    pub fn translate(self, offset: Vector2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            z: self.z,
        }
    }

    pub fn distance_to(self, other: PlanarPoint) -> f64 {
        (other.xy() - self.xy()).norm()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("{what} has too few vertices ({count})")]
    TooFewVertices { what: String, count: usize },
    #[error("{what} has a zero-length segment starting at vertex {index}")]
    ZeroLengthSegment { what: String, index: usize },
    #[error("{what} encloses zero area")]
    ZeroArea { what: String },
    #[error("{what} self-intersects between segments {first} and {second}")]
    SelfIntersection {
        what: String,
        first: usize,
        second: usize,
    },
    #[error("geometry has no parts")]
    Empty,
}

/// Closed, named polygon ring. Construction validates closure, area and simplicity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ring {
    name: String,
    points: Vec<PlanarPoint>,
}

impl Ring {
    /// Close `points` (appending the first vertex when needed) and validate the ring.
    pub fn closed(name: impl Into<String>, mut points: Vec<PlanarPoint>) -> Result<Ring, GeometryError> {
        let name = name.into();
        if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) {
            if first != last {
                points.push(first);
            }
        }
        if points.len() < 4 {
            return Err(GeometryError::TooFewVertices {
                what: name,
                count: points.len(),
            });
        }
        check_segments(&name, &points)?;
        if footprint(&points).unsigned_area() < AREA_EPSILON_M2 {
            return Err(GeometryError::ZeroArea { what: name });
        }
        if let Some((first, second)) = polyline_self_intersection(&points, true) {
            return Err(GeometryError::SelfIntersection {
                what: name,
                first,
                second,
            });
        }
        Ok(Ring { name, points })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vertices including the repeated closing vertex.
    pub fn points(&self) -> &[PlanarPoint] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.points.first() == self.points.last()
    }

    /// Horizontal area (m²).
    pub fn area(&self) -> f64 {
        footprint(&self.points).unsigned_area()
    }

    /// Horizontal footprint as a `geo` polygon.
    pub fn footprint(&self) -> Polygon<f64> {
        footprint(&self.points)
    }

    /// True when `(x, y)` lies inside the ring or on its boundary.
    pub fn covers(&self, x: f64, y: f64) -> bool {
        self.footprint().intersects(&Coord { x, y })
    }

    /// Surface elevation above `(x, y)`, interpolated linearly across the
    /// ring's triangulation. `None` outside the ring or when a vertex of the
    /// enclosing triangle has no elevation.
    pub fn elevation_at(&self, x: f64, y: f64) -> Option<f64> {
        if !self.covers(x, y) {
            return None;
        }
        let target = Coord { x, y };
        self.footprint().earcut_triangles().into_iter().find_map(|triangle| {
            let corners = [triangle.0, triangle.1, triangle.2];
            let weights = barycentric(corners, target)?;
            let mut z = 0.0;
            for (corner, weight) in corners.iter().zip(weights) {
                z += weight * self.vertex_elevation(*corner)?;
            }
            Some(z)
        })
    }

    fn vertex_elevation(&self, corner: Coord<f64>) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.x == corner.x && p.y == corner.y)
            .and_then(|p| p.z)
    }
}

/// Geometry emitted by a builder: one open path or a set of named surface rings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "parts")]
pub enum Geometry {
    LineString(Vec<PlanarPoint>),
    Surfaces(Vec<Ring>),
}

impl Geometry {
    /// Open path; rejects collapsed segments and paths that cross themselves.
    /// A path that ends on its own start (a calm-air full turn) is checked as a ring.
    pub fn line_string(points: Vec<PlanarPoint>) -> Result<Geometry, GeometryError> {
        const WHAT: &str = "line string";
        if points.len() < 2 {
            return Err(GeometryError::TooFewVertices {
                what: WHAT.to_string(),
                count: points.len(),
            });
        }
        check_segments(WHAT, &points)?;
        let returns_to_start = points.len() > 3 && points[0].distance_to(points[points.len() - 1]) < LENGTH_EPSILON_M;
        if let Some((first, second)) = polyline_self_intersection(&points, returns_to_start) {
            return Err(GeometryError::SelfIntersection {
                what: WHAT.to_string(),
                first,
                second,
            });
        }
        Ok(Geometry::LineString(points))
    }

    pub fn surfaces(rings: Vec<Ring>) -> Result<Geometry, GeometryError> {
        if rings.is_empty() {
            return Err(GeometryError::Empty);
        }
        Ok(Geometry::Surfaces(rings))
    }

    pub fn rings(&self) -> &[Ring] {
        match self {
            Geometry::Surfaces(rings) => rings,
            Geometry::LineString(_) => &[],
        }
    }

    pub fn line(&self) -> Option<&[PlanarPoint]> {
        match self {
            Geometry::LineString(points) => Some(points),
            Geometry::Surfaces(_) => None,
        }
    }

    pub fn points(&self) -> Vec<PlanarPoint> {
        match self {
            Geometry::LineString(points) => points.clone(),
            Geometry::Surfaces(rings) => rings.iter().flat_map(|r| r.points().iter().copied()).collect(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            Geometry::LineString(points) => points.len(),
            Geometry::Surfaces(rings) => rings.iter().map(|r| r.points().len()).sum(),
        }
    }

    /// True when every vertex carries an elevation.
    pub fn is_three_dimensional(&self) -> bool {
        self.points().iter().all(|p| p.z.is_some())
    }
}

fn check_segments(what: &str, points: &[PlanarPoint]) -> Result<(), GeometryError> {
    for (index, pair) in points.windows(2).enumerate() {
        if pair[0].distance_to(pair[1]) < LENGTH_EPSILON_M {
            return Err(GeometryError::ZeroLengthSegment {
                what: what.to_string(),
                index,
            });
        }
    }
    Ok(())
}

fn coord(point: PlanarPoint) -> Coord<f64> {
    Coord { x: point.x, y: point.y }
}

fn footprint(points: &[PlanarPoint]) -> Polygon<f64> {
    Polygon::new(points.iter().copied().map(coord).collect::<LineString<f64>>(), vec![])
}

/// First pair of segments that touch or cross anywhere other than a shared
/// vertex of neighbours, if any.
///
/// For a `closed` polyline the first and last segments are neighbours.
pub fn polyline_self_intersection(points: &[PlanarPoint], closed: bool) -> Option<(usize, usize)> {
    let segments: Vec<Line<f64>> = points
        .windows(2)
        .map(|pair| Line::new(coord(pair[0]), coord(pair[1])))
        .collect();
    let count = segments.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let neighbours = j == i + 1 || (closed && i == 0 && j == count - 1);
            match line_intersection(segments[i], segments[j]) {
                None => {}
                // Neighbours always meet at their shared vertex; only an overlap counts.
                Some(LineIntersection::SinglePoint { .. }) if neighbours => {}
                Some(_) => return Some((i, j)),
            }
        }
    }
    None
}

fn barycentric(corners: [Coord<f64>; 3], p: Coord<f64>) -> Option<[f64; 3]> {
    let [a, b, c] = corners;
    let det = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if det == 0.0 {
        return None;
    }
    let wa = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / det;
    let wb = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / det;
    let wc = 1.0 - wa - wb;
    [wa, wb, wc]
        .iter()
        .all(|w| *w >= -BARYCENTRIC_EPSILON)
        .then_some([wa, wb, wc])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<PlanarPoint> {
        vec![
            PlanarPoint::new(0.0, 0.0),
            PlanarPoint::new(10.0, 0.0),
            PlanarPoint::new(10.0, 10.0),
            PlanarPoint::new(0.0, 10.0),
        ]
    }

    #[test]
    fn ring_is_closed_automatically() {
        let ring = Ring::closed("square", square()).expect("square");
        assert!(ring.is_closed());
        assert_eq!(ring.points().len(), 5);
        assert!((ring.area() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn bowtie_ring_is_rejected() {
        let points = vec![
            PlanarPoint::new(0.0, 0.0),
            PlanarPoint::new(10.0, 0.0),
            PlanarPoint::new(0.0, 10.0),
            PlanarPoint::new(6.0, 14.0),
        ];
        assert!(matches!(
            Ring::closed("bowtie", points),
            Err(GeometryError::SelfIntersection { .. })
        ));
    }

    #[test]
    fn collapsed_rings_are_rejected() {
        let collinear = vec![
            PlanarPoint::new(0.0, 0.0),
            PlanarPoint::new(5.0, 0.0),
            PlanarPoint::new(10.0, 0.0),
        ];
        assert!(matches!(Ring::closed("line", collinear), Err(GeometryError::ZeroArea { .. })));

        let mut repeated = square();
        repeated.insert(1, PlanarPoint::new(0.0, 0.0));
        assert!(matches!(
            Ring::closed("repeat", repeated),
            Err(GeometryError::ZeroLengthSegment { index: 0, .. })
        ));
        assert!(matches!(
            Ring::closed("pair", square()[..2].to_vec()),
            Err(GeometryError::TooFewVertices { count: 3, .. })
        ));
    }

    #[test]
    fn looping_line_string_is_rejected() {
        let looped = vec![
            PlanarPoint::new(0.0, 0.0),
            PlanarPoint::new(10.0, 0.0),
            PlanarPoint::new(10.0, 10.0),
            PlanarPoint::new(5.0, -5.0),
        ];
        assert!(matches!(
            Geometry::line_string(looped),
            Err(GeometryError::SelfIntersection { first: 0, second: 2, .. })
        ));

        let backtrack = vec![
            PlanarPoint::new(0.0, 0.0),
            PlanarPoint::new(10.0, 0.0),
            PlanarPoint::new(4.0, 0.0),
        ];
        assert!(matches!(
            Geometry::line_string(backtrack),
            Err(GeometryError::SelfIntersection { first: 0, second: 1, .. })
        ));

        let straight = vec![
            PlanarPoint::new(0.0, 0.0),
            PlanarPoint::new(10.0, 0.0),
            PlanarPoint::new(20.0, 0.0),
        ];
        assert!(Geometry::line_string(straight).is_ok());

        let mut lap = square();
        lap.push(PlanarPoint::new(0.0, 0.0));
        assert!(Geometry::line_string(lap).is_ok());
    }

    #[test]
    fn sloping_ring_reports_elevation_inside_only() {
        let ramp = Ring::closed(
            "ramp",
            vec![
                PlanarPoint::with_z(0.0, -50.0, 0.0),
                PlanarPoint::with_z(1000.0, -50.0, 20.0),
                PlanarPoint::with_z(1000.0, 50.0, 20.0),
                PlanarPoint::with_z(0.0, 50.0, 0.0),
            ],
        )
        .expect("ramp");

        assert!(ramp.covers(500.0, 0.0));
        assert!(ramp.covers(1000.0, 50.0));
        assert!(!ramp.covers(1000.1, 0.0));

        let mid = ramp.elevation_at(500.0, 10.0).expect("inside");
        assert!((mid - 10.0).abs() < 1e-9);
        let edge = ramp.elevation_at(250.0, -50.0).expect("on edge");
        assert!((edge - 5.0).abs() < 1e-9);
        assert_eq!(ramp.elevation_at(-1.0, 0.0), None);

        let flat = Ring::closed("flat", square()).expect("square");
        assert_eq!(flat.elevation_at(5.0, 5.0), None);
    }

    #[test]
    fn bearings_are_clockwise_from_north() {
        let east = Vector2::from_bearing(90.0);
        assert!((east.x - 1.0).abs() < 1e-12 && east.y.abs() < 1e-12);
        assert!((Vector2::new(-1.0, 0.0).bearing_deg() - 270.0).abs() < 1e-12);
    }
}
