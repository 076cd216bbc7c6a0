use approx::{assert_abs_diff_eq, assert_relative_eq};
use procedure_surfaces::config::EngineSettings;
use procedure_surfaces::core::{PlanarPoint, Quantity, ScalarInputSet, Vector2, polyline_self_intersection};
use procedure_surfaces::kinematics::{
    air_vector, max_drift_angle, standard_rate_turn_radius, wind_corrected_ground_vector, wind_vector,
};
use procedure_surfaces::spiral::{SpiralError, SpiralRequest, TurnDirection, WindModel, generate};
use procedure_surfaces::{CalculationType, EngineError, GeometryFeature, build_feature, keys};
use proptest::prelude::*;

fn request(wind_kt: f64, wind_model: WindModel, turn_direction: TurnDirection) -> SpiralRequest {
    SpiralRequest {
        start: PlanarPoint::new(0.0, 0.0),
        initial_heading: Quantity::degrees(90.0),
        true_airspeed: Quantity::knots(240.0),
        bank_angle: Quantity::degrees(25.0),
        wind_speed: Quantity::knots(wind_kt),
        wind_model,
        turn_direction,
        sweep: Quantity::degrees(360.0),
        step: Quantity::degrees(5.0),
    }
}

fn scenario_a() -> ScalarInputSet {
    ScalarInputSet::new()
        .with(keys::AERODROME_ELEVATION, Quantity::feet(0.0))
        .with(keys::TEMPERATURE_REFERENCE, Quantity::celsius(15.0))
        .with(keys::IAS, Quantity::knots(220.0))
        .with(keys::ALTITUDE, Quantity::feet(6_000.0))
        .with(keys::BANK_ANGLE, Quantity::degrees(25.0))
        .with(keys::WIND_SPEED, Quantity::knots(30.0))
        .with(keys::WIND_DIRECTION, Quantity::degrees(270.0))
        .with(keys::TURN_DIRECTION, "R")
        .with(keys::START_X, Quantity::meters(0.0))
        .with(keys::START_Y, Quantity::meters(0.0))
        .with(keys::INITIAL_HEADING, Quantity::degrees(0.0))
}

#[test]
fn scenario_a_produces_nine_rows_and_a_simple_spiral() {
    let feature = build_feature(CalculationType::WindSpiral, &scenario_a(), &EngineSettings::default())
        .expect("wind spiral");

    assert_eq!(feature.calculation_type(), CalculationType::WindSpiral);
    assert_eq!(feature.discriminator(), "Wind Spiral");
    let record = feature.parameters();
    assert_eq!(
        record.labels(),
        vec![
            "Aerodrome Elevation",
            "Temperature Reference",
            "ISA Calculated",
            "ISA Variation",
            "IAS",
            "Altitude",
            "Bank Angle",
            "Wind Speed",
            "Turn Direction",
        ]
    );
    assert_eq!(record.get("ISA Variation").map(|e| e.value.as_str()), Some("0.00"));
    assert_eq!(record.get("Altitude").map(|e| e.unit.as_str()), Some("ft"));
    let turn = record.get("Turn Direction").expect("turn direction row");
    assert_eq!((turn.value.as_str(), turn.unit.as_str()), ("R", ""));

    let points = feature.geometry().line().expect("spiral is a line string");
    assert_eq!(points.len(), 360 / 5 + 1);
    assert_eq!(polyline_self_intersection(points, false), None);
    assert!(!feature.geometry().is_three_dimensional());
}

#[test]
fn fixed_wind_spiral_ends_drifted_off_the_start() {
    let req = request(30.0, WindModel::FromBearing(Quantity::degrees(270.0)), TurnDirection::Right);
    let path = generate(&req).expect("spiral");
    let points = path.geometry.line().expect("line");

    // After a full turn the heading is back to 090, so the end sits one wind
    // effect away from the start, along the outward radial rotated by the drift.
    let wind = wind_vector(req.wind_speed, Quantity::degrees(270.0)).expect("wind");
    let air = air_vector(req.true_airspeed, req.initial_heading).expect("air");
    let drift = wind_corrected_ground_vector(air, wind).drift.value;
    assert_abs_diff_eq!(drift, 0.0, epsilon = 1e-9);
    // The outward radial at the start of a right turn from 090 points north.
    let expected = PlanarPoint::new(0.0, 0.0).translate(Vector2::from_bearing(drift) * path.wind_effect.value);
    let end = points[points.len() - 1];
    assert_abs_diff_eq!(end.x, expected.x, epsilon = 1e-6);
    assert_abs_diff_eq!(end.y, expected.y, epsilon = 1e-6);
    assert_relative_eq!(path.wind_effect.value, wind.norm() * path.turn_time.value, max_relative = 1e-12);
    assert!(path.max_ground_speed.value > 240.0);
    assert_eq!(polyline_self_intersection(points, false), None);
}

#[test]
fn tailwind_and_crosswind_bearings_give_simple_spirals() {
    for from in [165.0, 180.0, 195.0] {
        let req = request(30.0, WindModel::FromBearing(Quantity::degrees(from)), TurnDirection::Right);
        let path = generate(&req).unwrap_or_else(|e| panic!("wind from {from}: {e}"));
        let points = path.geometry.line().expect("line");
        assert_eq!(polyline_self_intersection(points, false), None, "wind from {from}");
    }

    let mut inputs = scenario_a();
    inputs.insert(keys::WIND_DIRECTION, Quantity::degrees(180.0));
    let feature = build_feature(CalculationType::WindSpiral, &inputs, &EngineSettings::default())
        .expect("wind from the south");
    assert_eq!(feature.geometry().vertex_count(), 73);
}

#[test]
fn zero_wind_spiral_is_a_circle_of_turn_radius() {
    let expected = standard_rate_turn_radius(Quantity::knots(240.0), Quantity::degrees(25.0))
        .expect("radius")
        .value;
    for model in [WindModel::Omnidirectional, WindModel::FromBearing(Quantity::degrees(45.0))] {
        let path = generate(&request(0.0, model, TurnDirection::Left)).expect("spiral");
        assert_relative_eq!(path.radius.value, expected);
        for p in path.geometry.points() {
            assert_relative_eq!(p.distance_to(path.center), expected, max_relative = 1e-9);
        }
        let points = path.geometry.points();
        assert_abs_diff_eq!(points[0].x, points[points.len() - 1].x, epsilon = 1e-6);
        assert_abs_diff_eq!(points[0].y, points[points.len() - 1].y, epsilon = 1e-6);
        assert_abs_diff_eq!(path.wind_effect.value, 0.0);
    }
}

#[test]
fn omnidirectional_wind_pushes_every_point_further_out() {
    let req = request(30.0, WindModel::Omnidirectional, TurnDirection::Right);
    let path = generate(&req).expect("spiral");
    let distances: Vec<f64> = path.geometry.points().iter().map(|p| p.distance_to(path.center)).collect();
    assert_relative_eq!(distances[0], path.radius.value, max_relative = 1e-12);
    assert!(distances.windows(2).all(|pair| pair[1] > pair[0]));

    let (r, e) = (path.radius.value, path.wind_effect.value);
    let drift = max_drift_angle(req.true_airspeed, req.wind_speed).expect("drift").value.to_radians();
    assert_relative_eq!(
        distances[distances.len() - 1],
        (r * r + e * e + 2.0 * r * e * drift.cos()).sqrt(),
        max_relative = 1e-9
    );
}

#[test]
fn omnidirectional_spiral_matches_hand_computed_points() {
    let mut req = request(30.0, WindModel::Omnidirectional, TurnDirection::Right);
    req.step = Quantity::degrees(30.0);
    let path = generate(&req).expect("spiral");
    let points = path.geometry.points();
    assert_eq!(points.len(), 13);

    // Worked with the nautical-mile radius V²/(68 620·tan φ), which agrees with
    // v²/(g·tan φ) to better than 1e-4.
    let expected = [
        (3, 3_983.262, -3_251.981),
        (6, 163.648, -7_966.524),
        (11, -3_117.399, 1_465.647),
    ];
    for (index, x, y) in expected {
        assert_relative_eq!(points[index].x, x, max_relative = 2e-4);
        assert_relative_eq!(points[index].y, y, max_relative = 2e-4);
    }
}

#[test]
fn turn_direction_mirrors_the_path() {
    let mut right = request(0.0, WindModel::Omnidirectional, TurnDirection::Right);
    right.initial_heading = Quantity::degrees(0.0);
    let left = SpiralRequest {
        turn_direction: TurnDirection::Left,
        ..right.clone()
    };
    let right = generate(&right).expect("right").geometry.points();
    let left = generate(&left).expect("left").geometry.points();
    assert_eq!(right.len(), left.len());
    for (r, l) in right.iter().zip(&left) {
        assert_abs_diff_eq!(r.x, -l.x, epsilon = 1e-6);
        assert_abs_diff_eq!(r.y, l.y, epsilon = 1e-6);
    }
}

#[test]
fn step_setting_controls_resolution_and_end_point() {
    let mut req = request(20.0, WindModel::Omnidirectional, TurnDirection::Right);
    req.step = Quantity::degrees(2.5);
    assert_eq!(generate(&req).expect("fine").geometry.vertex_count(), 145);

    // 360 / 7 is not whole: the last step is clipped to the sweep.
    req.step = Quantity::degrees(7.0);
    let coarse = generate(&req).expect("coarse");
    assert_eq!(coarse.geometry.vertex_count(), 53);
    let last = coarse.geometry.points()[52];
    let (r, e) = (coarse.radius.value, coarse.wind_effect.value);
    let drift = max_drift_angle(req.true_airspeed, req.wind_speed).expect("drift").value.to_radians();
    assert_abs_diff_eq!(
        last.distance_to(coarse.center),
        (r * r + e * e + 2.0 * r * e * drift.cos()).sqrt(),
        epsilon = 1e-6
    );
}

#[test]
fn step_outside_configured_range_is_rejected() {
    let mut req = request(20.0, WindModel::Omnidirectional, TurnDirection::Right);
    req.step = Quantity::degrees(0.1);
    assert!(matches!(generate(&req), Err(SpiralError::Input(_))));

    let settings = EngineSettings { spiral_step_deg: 45.0 };
    let err = build_feature(CalculationType::WindSpiral, &scenario_a(), &settings).expect_err("step too coarse");
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[test]
fn scenario_b_ninety_degree_bank_is_invalid_input() {
    let mut inputs = scenario_a();
    inputs.insert(keys::BANK_ANGLE, Quantity::degrees(90.0));
    let err = build_feature(CalculationType::WindSpiral, &inputs, &EngineSettings::default())
        .expect_err("90 degree bank");
    assert!(matches!(err, EngineError::InvalidInput(_)), "unexpected error: {err:?}");
    assert!(err.to_string().contains("bank_angle"));
}

#[test]
fn missing_or_unrecognised_inputs_are_named() {
    let mut inputs = scenario_a();
    inputs.remove(keys::IAS);
    let err = build_feature(CalculationType::WindSpiral, &inputs, &EngineSettings::default()).expect_err("no ias");
    assert!(err.to_string().contains("ias"));

    let mut inputs = scenario_a();
    inputs.insert(keys::TURN_DIRECTION, "up");
    let err = build_feature(CalculationType::WindSpiral, &inputs, &EngineSettings::default())
        .expect_err("bad direction");
    assert!(err.to_string().contains("turn_direction"));
}

#[test]
fn manual_isa_variation_overrides_the_calculated_one() {
    let base = build_feature(CalculationType::WindSpiral, &scenario_a(), &EngineSettings::default()).expect("base");
    let mut inputs = scenario_a();
    inputs.insert(keys::ISA_VARIATION, Quantity::celsius(20.0));
    let hot = build_feature(CalculationType::WindSpiral, &inputs, &EngineSettings::default()).expect("hot");

    assert_eq!(base.parameters().len(), hot.parameters().len());
    assert_eq!(hot.parameters().get("ISA Calculated"), base.parameters().get("ISA Calculated"));
    // A warmer day means a faster, wider turn.
    let half_turn = |f: &GeometryFeature| f.geometry().points()[36];
    assert!(half_turn(&hot).x > half_turn(&base).x);
}

proptest! {
    #[test]
    fn generation_is_deterministic(
        heading in 0.0f64..360.0,
        wind in 0.0f64..60.0,
        bank in 5.0f64..35.0,
        from in 0.0f64..360.0,
        left in any::<bool>(),
    ) {
        let mut req = request(
            wind,
            WindModel::FromBearing(Quantity::degrees(from)),
            if left { TurnDirection::Left } else { TurnDirection::Right },
        );
        req.initial_heading = Quantity::degrees(heading);
        req.bank_angle = Quantity::degrees(bank);
        let a = generate(&req).unwrap();
        let b = generate(&req).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&a.geometry).unwrap(),
            serde_json::to_string(&b.geometry).unwrap()
        );
        prop_assert_eq!(a.geometry, b.geometry);
    }

    #[test]
    fn fixed_wind_spiral_never_crosses_itself(
        from in 0.0f64..360.0,
        wind in 1.0f64..80.0,
        left in any::<bool>(),
    ) {
        let req = request(
            wind,
            WindModel::FromBearing(Quantity::degrees(from)),
            if left { TurnDirection::Left } else { TurnDirection::Right },
        );
        let path = generate(&req).unwrap();
        prop_assert_eq!(polyline_self_intersection(path.geometry.line().unwrap(), false), None);

        let mut inputs = scenario_a();
        inputs.insert(keys::WIND_DIRECTION, Quantity::degrees(from));
        prop_assert!(build_feature(CalculationType::WindSpiral, &inputs, &EngineSettings::default()).is_ok());
    }
}

#[test]
fn builders_run_concurrently_with_identical_results() {
    let inputs = scenario_a();
    let settings = EngineSettings::default();
    let serial = build_feature(CalculationType::WindSpiral, &inputs, &settings).expect("serial");
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| build_feature(CalculationType::WindSpiral, &inputs, &settings)))
            .collect();
        for handle in handles {
            let parallel = handle.join().expect("thread").expect("parallel build");
            assert_eq!(parallel, serial);
        }
    });
}
