use ifp_core::Geometry;
use tracing::debug;

use crate::SurfaceError;
use crate::category::{ApproachCategory, CategoryProfile, category_profile};
use crate::frame::{CrossSection, LocalPoint, RunwayFrame};

/// Basic ILS surfaces plus the dimensions they were built from.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicSurfaces {
    pub geometry: Geometry,
    pub profile: &'static CategoryProfile,
}

/// Ground, approach, missed approach, and eight transitional surfaces.
pub fn build_basic_surfaces(frame: &RunwayFrame, category: ApproachCategory) -> Result<BasicSurfaces, SurfaceError> {
    let p = category_profile(category);

    let ground_start = CrossSection::new(p.ground_before_threshold_m, p.inner_half_width_m, 0.0);
    let ground_end = CrossSection::new(-p.ground_after_threshold_m, p.inner_half_width_m, 0.0);
    let approach_1 = ground_start.extrude(p.approach_first_length_m, p.approach_divergence, p.approach_first_slope);
    let approach_2 = approach_1.extrude(p.approach_second_length_m, p.approach_divergence, p.approach_second_slope);

    // Up to the first station the missed approach edge is the foot of the transitional surface.
    let missed_mid = ground_end.extrude(
        -p.missed_first_length_m,
        p.missed_slope / p.transitional_slope,
        p.missed_slope,
    );
    let missed_end = missed_mid.extrude(
        -(p.missed_total_length_m - p.missed_first_length_m),
        p.missed_divergence,
        p.missed_slope,
    );

    let ceiling = p.transitional_ceiling_m;
    let outer_approach = approach_1.offset_to(ceiling, p.transitional_slope);
    let outer_ground = ground_start.offset_to(ceiling, p.transitional_slope);
    let outer_missed = missed_mid.offset_to(ceiling, p.transitional_slope);

    let mut rings = vec![
        frame.ring(
            "ground surface",
            &[ground_start.right(), ground_end.right(), ground_end.left(), ground_start.left()],
        )?,
        frame.ring(
            "approach surface first section",
            &[approach_1.right(), ground_start.right(), ground_start.left(), approach_1.left()],
        )?,
        frame.ring(
            "approach surface second section",
            &[approach_2.right(), approach_1.right(), approach_1.left(), approach_2.left()],
        )?,
        frame.ring(
            "missed approach surface",
            &[
                ground_end.right(),
                missed_mid.right(),
                missed_end.right(),
                missed_end.left(),
                missed_mid.left(),
                ground_end.left(),
            ],
        )?,
    ];

    let sides: [(&str, fn(CrossSection) -> LocalPoint); 2] =
        [("left", CrossSection::left), ("right", CrossSection::right)];
    for (side, edge) in sides {
        rings.push(frame.ring(
            &format!("transitional surface {side} 1"),
            &[edge(approach_2), edge(approach_1), edge(outer_approach)],
        )?);
        rings.push(frame.ring(
            &format!("transitional surface {side} 2"),
            &[edge(approach_1), edge(outer_approach), edge(outer_ground), edge(ground_start)],
        )?);
        rings.push(frame.ring(
            &format!("transitional surface {side} 3"),
            &[
                edge(outer_ground),
                edge(ground_start),
                edge(ground_end),
                edge(missed_mid),
                edge(outer_missed),
            ],
        )?);
        rings.push(frame.ring(
            &format!("transitional surface {side} 4"),
            &[edge(missed_mid), edge(missed_end), edge(outer_missed)],
        )?);
    }

    debug!(%category, rings = rings.len(), "built basic ILS surfaces");
    Ok(BasicSurfaces {
        geometry: Geometry::surfaces(rings)?,
        profile: p,
    })
}
