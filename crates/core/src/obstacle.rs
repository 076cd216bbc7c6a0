//! Obstacle selection and penetration against surface rings.

use serde::{Deserialize, Serialize};

use crate::error::{InputError, ensure_finite};
use crate::geometry::Ring;

/// Surveyed obstacle in the projected frame with its absolute top elevation (m).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(alias = "elev")]
    pub elevation: f64,
}

impl Obstacle {
    pub fn new(id: impl Into<String>, x: f64, y: f64, elevation: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            elevation,
        }
    }

    fn validate(&self) -> Result<(), InputError> {
        ensure_finite("obstacle x", self.x)?;
        ensure_finite("obstacle y", self.y)?;
        ensure_finite("obstacle elevation", self.elevation)?;
        Ok(())
    }
}

/// An obstacle lying under at least one surface, measured against the lowest one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleAssessment {
    pub obstacle: Obstacle,
    /// Name of the controlling surface.
    pub surface: String,
    /// Surface elevation above the obstacle; `None` for surfaces without z.
    pub surface_elevation: Option<f64>,
    /// Obstacle elevation minus surface elevation; positive values penetrate.
    pub penetration: Option<f64>,
}

impl ObstacleAssessment {
    pub fn penetrates(&self) -> bool {
        self.penetration.is_some_and(|p| p > 0.0)
    }
}

/// Select the obstacles that lie inside (or on the edge of) any ring, in input
/// order, and measure each against the lowest covering surface.
pub fn assess_obstacles(rings: &[Ring], obstacles: &[Obstacle]) -> Result<Vec<ObstacleAssessment>, InputError> {
    let mut assessments = Vec::new();
    for obstacle in obstacles {
        obstacle.validate()?;
        let covering: Vec<&Ring> = rings.iter().filter(|r| r.covers(obstacle.x, obstacle.y)).collect();
        let Some(first) = covering.first() else {
            continue;
        };

        let lowest = covering
            .iter()
            .filter_map(|ring| ring.elevation_at(obstacle.x, obstacle.y).map(|z| (*ring, z)))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        let (surface, surface_elevation) = match lowest {
            Some((ring, z)) => (ring.name(), Some(z)),
            None => (first.name(), None),
        };
        assessments.push(ObstacleAssessment {
            obstacle: obstacle.clone(),
            surface: surface.to_string(),
            surface_elevation,
            penetration: surface_elevation.map(|z| obstacle.elevation - z),
        });
    }
    Ok(assessments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlanarPoint;

    fn ramp(name: &str, base: f64) -> Ring {
        Ring::closed(
            name,
            vec![
                PlanarPoint::with_z(0.0, 0.0, base),
                PlanarPoint::with_z(100.0, 0.0, base + 10.0),
                PlanarPoint::with_z(100.0, 100.0, base + 10.0),
                PlanarPoint::with_z(0.0, 100.0, base),
            ],
        )
        .expect("ramp")
    }

    #[test]
    fn lowest_covering_surface_controls() {
        let rings = [ramp("high", 50.0), ramp("low", 20.0)];
        let obstacles = [
            Obstacle::new("mast", 50.0, 50.0, 30.0),
            Obstacle::new("tree", 150.0, 50.0, 999.0),
            Obstacle::new("crane", 0.0, 20.0, 10.0),
        ];
        let result = assess_obstacles(&rings, &obstacles).expect("assessment");

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].surface, "low");
        let surface = result[0].surface_elevation.expect("sloping surface");
        assert!((surface - 25.0).abs() < 1e-9);
        assert!((result[0].penetration.expect("penetration") - 5.0).abs() < 1e-9);
        assert!(result[0].penetrates());
        assert_eq!(result[1].obstacle.id, "crane");
        assert!(!result[1].penetrates());
    }

    #[test]
    fn non_finite_obstacle_is_rejected() {
        let err = assess_obstacles(&[ramp("r", 0.0)], &[Obstacle::new("bad", f64::NAN, 0.0, 1.0)])
            .expect_err("NaN");
        assert!(err.to_string().contains("obstacle x"));
    }
}
