use std::fs;
use std::path::PathBuf;

use approx::assert_relative_eq;
use procedure_surfaces::config::{ConfigError, EngineSettings, load_obstacles, load_request};
use procedure_surfaces::core::{Obstacle, Quantity, ScalarInputSet};
use procedure_surfaces::export::table::{TableFormat, write_assessment};
use procedure_surfaces::{CalculationType, EngineError, GeometryFeature, build_feature, build_request, keys};

fn sample(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("configs").join(path)
}

fn straight_in() -> GeometryFeature {
    let inputs = ScalarInputSet::new()
        .with(keys::THRESHOLD_X, Quantity::meters(1_000.0))
        .with(keys::THRESHOLD_Y, Quantity::meters(-500.0))
        .with(keys::THRESHOLD_ELEVATION, Quantity::meters(35.0))
        .with(keys::RUNWAY_BEARING, Quantity::degrees(90.0))
        .with(keys::RUNWAY_WIDTH, Quantity::meters(45.0))
        .with(keys::STRIP_WIDTH, Quantity::meters(280.0))
        .with(keys::OCH, Quantity::meters(75.0))
        .with(keys::RDH, Quantity::meters(15.0))
        .with(keys::VPA, Quantity::degrees(3.0));
    build_feature(CalculationType::Vss, &inputs, &EngineSettings::default()).expect("VSS")
}

#[test]
fn obstacles_under_the_visual_segment_are_selected_and_measured() {
    let feature = straight_in();
    let length = 1.12 * 60.0 / 3.0_f64.to_radians().tan();
    // Both surfaces climb from 0 at the threshold to OCH at x = L, whatever the lateral offset.
    let surface_z = |along: f64| 35.0 + 75.0 * along / length;

    let obstacles = [
        Obstacle::new("mast", 1_000.0 - length / 2.0, -500.0, 80.0),
        Obstacle::new("beyond threshold", 2_000.0, -500.0, 500.0),
        Obstacle::new("tree", 1_000.0 - length / 4.0, -350.0, 50.0),
    ];
    let result = feature.assess_obstacles(&obstacles).expect("assessment");

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].obstacle.id, "mast");
    assert_eq!(result[0].surface, "VSS");
    assert_relative_eq!(result[0].surface_elevation.expect("z"), surface_z(length / 2.0), epsilon = 1e-6);
    assert_relative_eq!(result[0].penetration.expect("penetration"), 7.5, epsilon = 1e-6);
    assert!(result[0].penetrates());

    assert_eq!(result[1].obstacle.id, "tree");
    assert_eq!(result[1].surface, "OCS left");
    assert_relative_eq!(result[1].penetration.expect("penetration"), 50.0 - surface_z(length / 4.0), epsilon = 1e-6);
    assert!(!result[1].penetrates());
}

#[test]
fn lowest_surface_controls_where_oas_surfaces_overlap() {
    let inputs = ScalarInputSet::new()
        .with(keys::THRESHOLD_X, Quantity::meters(0.0))
        .with(keys::THRESHOLD_Y, Quantity::meters(0.0))
        .with(keys::THRESHOLD_ELEVATION, Quantity::meters(10.0))
        .with(keys::RUNWAY_BEARING, Quantity::degrees(270.0))
        .with(keys::APPROACH_CATEGORY, "CAT I")
        .with(keys::OAS_TYPE, "Both")
        .with(keys::FAP_ELEVATION, Quantity::meters(610.0))
        .with(keys::MOC_INTERMEDIATE, Quantity::meters(150.0));
    let feature = build_feature(CalculationType::IlsOasCategoryI, &inputs, &EngineSettings::default()).expect("OAS");

    // On the centre line 2 km out, W and "W extended" share the same plane.
    let result = feature
        .assess_obstacles(&[Obstacle::new("mast", 2_000.0, 0.0, 1_000.0)])
        .expect("assessment");
    assert_eq!(result.len(), 1);
    assert!(result[0].surface.starts_with('W'));
    let lowest = feature
        .geometry()
        .rings()
        .iter()
        .filter_map(|ring| ring.elevation_at(2_000.0, 0.0))
        .fold(f64::INFINITY, f64::min);
    assert_relative_eq!(result[0].surface_elevation.expect("z"), lowest, epsilon = 1e-9);
    assert!(result[0].penetrates());
}

#[test]
fn spiral_has_no_surfaces_to_assess() {
    let inputs = ScalarInputSet::new()
        .with(keys::AERODROME_ELEVATION, Quantity::feet(0.0))
        .with(keys::TEMPERATURE_REFERENCE, Quantity::celsius(15.0))
        .with(keys::IAS, Quantity::knots(220.0))
        .with(keys::ALTITUDE, Quantity::feet(6_000.0))
        .with(keys::BANK_ANGLE, Quantity::degrees(25.0))
        .with(keys::WIND_SPEED, Quantity::knots(30.0))
        .with(keys::TURN_DIRECTION, "R")
        .with(keys::START_X, Quantity::meters(0.0))
        .with(keys::START_Y, Quantity::meters(0.0))
        .with(keys::INITIAL_HEADING, Quantity::degrees(0.0));
    let spiral = build_feature(CalculationType::WindSpiral, &inputs, &EngineSettings::default()).expect("spiral");
    let err = spiral
        .assess_obstacles(&[Obstacle::new("mast", 0.0, 0.0, 10.0)])
        .expect_err("line string");
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[test]
fn sample_obstacles_against_the_sample_request() {
    let obstacles = load_obstacles(sample("obstacles/rwy09_vss.csv")).expect("obstacles");
    assert_eq!(obstacles.len(), 4);
    assert_eq!(obstacles[2], Obstacle::new("pylon", 1_500.0, 250.0, 200.0));

    let request = load_request(sample("requests/vss_straight.toml"), 0).expect("request");
    let feature = build_request(&request).expect("VSS");
    let result = feature.assess_obstacles(&obstacles).expect("assessment");
    let ids: Vec<&str> = result.iter().map(|a| a.obstacle.id.as_str()).collect();
    assert_eq!(ids, vec!["mast", "tree", "crane"]);
    assert_eq!(result.iter().filter(|a| a.penetrates()).count(), 1);

    let mut buffer = Vec::new();
    write_assessment(&mut buffer, &result, TableFormat::Tsv).expect("table");
    let text = String::from_utf8(buffer).expect("utf-8");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("OBSTACLE ASSESSMENT"));
    assert_eq!(
        lines.next(),
        Some("ID\tX\tY\tELEVATION\tSURFACE\tSURFACE ELEVATION\tPENETRATION")
    );
    assert_eq!(lines.next(), Some("mast\t-141.13\t250.00\t80.00\tVSS\t72.50\t7.50"));
}

#[test]
fn obstacle_files_accept_the_short_elevation_header_and_report_bad_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let short = dir.path().join("short.csv");
    fs::write(&short, "id, x, y, elev\nantenna, 10, 20, 30.5\n").expect("write");
    assert_eq!(
        load_obstacles(&short).expect("short header"),
        vec![Obstacle::new("antenna", 10.0, 20.0, 30.5)]
    );

    let bad = dir.path().join("bad.csv");
    fs::write(&bad, "id,x,y,elevation\nantenna,ten,20,30\n").expect("write");
    assert!(matches!(load_obstacles(&bad), Err(ConfigError::Csv(_))));
}
