use ifp_core::{ensure_finite, GeometryError, InputError, PlanarPoint, Quantity, Ring, Unit, Vector2};

/// Point in the runway frame: `x` metres from the reference point toward the
/// approach, `y` metres left of the landing direction, `h` metres above threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalPoint {
    pub x: f64,
    pub y: f64,
    pub h: f64,
}

impl LocalPoint {
    pub const fn new(x: f64, y: f64, h: f64) -> Self {
        Self { x, y, h }
    }

    /// Reflection across the runway centre line.
    pub const fn mirrored(self) -> Self {
        Self::new(self.x, -self.y, self.h)
    }

    /// Point at fraction `t` along `self → other`; `t > 1` extrapolates.
    pub fn along(self, other: LocalPoint, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.h + (other.h - self.h) * t,
        )
    }
}

/// Symmetric cut across a surface at one longitudinal station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossSection {
    pub x: f64,
    pub half_width: f64,
    pub h: f64,
}

impl CrossSection {
    pub const fn new(x: f64, half_width: f64, h: f64) -> Self {
        Self { x, half_width, h }
    }

    /// Move `dx` metres along the runway axis (negative runs past the threshold),
    /// splaying each side by `divergence` and climbing at `slope` per metre travelled.
    pub fn extrude(self, dx: f64, divergence: f64, slope: f64) -> Self {
        let run = dx.abs();
        Self::new(self.x + dx, self.half_width + run * divergence, self.h + run * slope)
    }

    pub fn left(self) -> LocalPoint {
        LocalPoint::new(self.x, self.half_width, self.h)
    }

    pub fn right(self) -> LocalPoint {
        LocalPoint::new(self.x, -self.half_width, self.h)
    }

    /// Outer edge of a lateral surface rising at `slope` from this section to `ceiling`.
    pub fn offset_to(self, ceiling: f64, slope: f64) -> CrossSection {
        Self::new(self.x, self.half_width + (ceiling - self.h) / slope, ceiling)
    }
}

/// Runway-aligned frame anchored at the (possibly displaced) threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunwayFrame {
    origin: Vector2,
    landing_bearing_deg: f64,
    threshold_elevation_m: f64,
}

impl RunwayFrame {
    /// A positive `displacement` moves the reference point along the landing direction.
    pub fn new(
        threshold: PlanarPoint,
        landing_bearing: Quantity,
        threshold_elevation: Quantity,
        displacement: Option<Quantity>,
    ) -> Result<Self, InputError> {
        ensure_finite("threshold_x", threshold.x)?;
        ensure_finite("threshold_y", threshold.y)?;
        let landing_bearing_deg = landing_bearing.expect_in("runway_bearing", Unit::Degrees)?;
        let threshold_elevation_m = threshold_elevation.expect_in("threshold_elevation", Unit::Meters)?;
        let shift_m = displacement
            .map(|d| d.expect_in("threshold_displacement", Unit::Meters))
            .transpose()?
            .unwrap_or(0.0);
        Ok(Self {
            origin: threshold.xy() + Vector2::from_bearing(landing_bearing_deg) * shift_m,
            landing_bearing_deg,
            threshold_elevation_m,
        })
    }

    pub fn landing_bearing_deg(&self) -> f64 {
        self.landing_bearing_deg
    }

    pub fn threshold_elevation_m(&self) -> f64 {
        self.threshold_elevation_m
    }

    /// Reference point in the planar frame, at threshold elevation.
    pub fn origin(&self) -> PlanarPoint {
        PlanarPoint::with_z(self.origin.x, self.origin.y, self.threshold_elevation_m)
    }

    pub fn project(&self, local: LocalPoint) -> PlanarPoint {
        let toward_approach = Vector2::from_bearing(self.landing_bearing_deg + 180.0) * local.x;
        let left = Vector2::from_bearing(self.landing_bearing_deg - 90.0) * local.y;
        let p = self.origin + toward_approach + left;
        PlanarPoint::with_z(p.x, p.y, self.threshold_elevation_m + local.h)
    }

    pub fn ring(&self, name: &str, vertices: &[LocalPoint]) -> Result<Ring, GeometryError> {
        Ring::closed(name, vertices.iter().map(|&v| self.project(v)).collect())
    }
}
