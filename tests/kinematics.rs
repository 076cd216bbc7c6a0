use approx::{assert_abs_diff_eq, assert_relative_eq};
use procedure_surfaces::core::units::kt_to_ms;
use procedure_surfaces::core::{InputError, Quantity, Unit, Vector2};
use procedure_surfaces::kinematics::{
    air_vector, max_drift_angle, rate_of_turn, standard_rate_turn_radius, true_airspeed, turn_time,
    wind_corrected_ground_vector, wind_effect, wind_vector,
};
use proptest::prelude::*;

#[test]
fn true_airspeed_equals_ias_at_standard_sea_level() {
    let tas = true_airspeed(Quantity::knots(220.0), Quantity::feet(0.0), Quantity::celsius(0.0)).expect("tas");
    assert_eq!(tas.unit, Unit::Knots);
    assert_relative_eq!(tas.value, 220.0, max_relative = 1e-5);
}

#[test]
fn true_airspeed_grows_with_altitude_and_temperature() {
    let tas = true_airspeed(Quantity::knots(220.0), Quantity::feet(6_000.0), Quantity::celsius(0.0)).expect("tas");
    assert_relative_eq!(tas.value, 240.632_282_354_57, epsilon = 1e-6);

    let warm = true_airspeed(Quantity::knots(220.0), Quantity::feet(6_000.0), Quantity::celsius(15.0)).expect("tas");
    assert!(warm.value > tas.value);
}

#[test]
fn radius_matches_procedure_design_form() {
    // r = V² / (68 620 · tan φ) NM with V in kt.
    let (v_kt, bank_deg) = (240.0_f64, 25.0_f64);
    let r = standard_rate_turn_radius(Quantity::knots(v_kt), Quantity::degrees(bank_deg)).expect("radius");
    assert_eq!(r.unit, Unit::Meters);
    let expected_nm = v_kt * v_kt / (68_620.0 * bank_deg.to_radians().tan());
    assert_relative_eq!(r.value / 1_852.0, expected_nm, max_relative = 2e-4);
}

#[test]
fn rate_of_turn_is_speed_over_radius() {
    let tas = Quantity::knots(180.0);
    let bank = Quantity::degrees(25.0);
    let r = standard_rate_turn_radius(tas, bank).expect("radius").value;
    let rate = rate_of_turn(tas, bank).expect("rate");
    assert_eq!(rate.unit, Unit::DegreesPerSecond);
    assert_relative_eq!(rate.value.to_radians() * r, kt_to_ms(180.0), max_relative = 1e-12);
}

#[test]
fn bank_angle_must_be_strictly_between_zero_and_ninety() {
    for bank in [90.0, 95.0, 0.0, -10.0] {
        let err = standard_rate_turn_radius(Quantity::knots(200.0), Quantity::degrees(bank)).expect_err("bad bank");
        assert!(matches!(err, InputError::OutOfRange { ref name, .. } if name.as_str() == "bank_angle"));
    }
}

#[test]
fn wind_blows_away_from_its_bearing() {
    let w = wind_vector(Quantity::knots(30.0), Quantity::degrees(270.0)).expect("wind");
    assert_relative_eq!(w.x, kt_to_ms(30.0), max_relative = 1e-12);
    assert_abs_diff_eq!(w.y, 0.0, epsilon = 1e-9);
}

#[test]
fn crosswind_drifts_track_downwind() {
    let air = air_vector(Quantity::meters_per_second(100.0), Quantity::degrees(0.0)).expect("air");
    let wind = Vector2::new(10.0, 0.0);
    let ground = wind_corrected_ground_vector(air, wind);
    assert_relative_eq!(ground.drift.value, 5.710_593_137_5, epsilon = 1e-9);
    assert_relative_eq!(ground.track.value, ground.drift.value, epsilon = 1e-9);
    assert_relative_eq!(ground.velocity.norm(), 101.0_f64.sqrt() * 10.0, max_relative = 1e-12);
    assert_eq!(ground.ground_speed.unit, Unit::Knots);
}

#[test]
fn zero_wind_keeps_heading_and_speed() {
    let air = air_vector(Quantity::knots(200.0), Quantity::degrees(135.0)).expect("air");
    let ground = wind_corrected_ground_vector(air, Vector2::new(0.0, 0.0));
    assert_abs_diff_eq!(ground.drift.value, 0.0, epsilon = 1e-9);
    assert_relative_eq!(ground.ground_speed.value, 200.0, max_relative = 1e-12);
}

#[test]
fn max_drift_requires_wind_below_airspeed() {
    let drift = max_drift_angle(Quantity::knots(200.0), Quantity::knots(20.0)).expect("drift");
    assert_relative_eq!(drift.value, 5.739_170_477_27, epsilon = 1e-9);

    let err = max_drift_angle(Quantity::knots(200.0), Quantity::knots(200.0)).expect_err("wind too strong");
    assert!(matches!(err, InputError::OutOfRange { .. }));
}

#[test]
fn turn_time_and_wind_effect() {
    let t = turn_time(Quantity::meters(1_000.0), Quantity::meters_per_second(100.0), Quantity::degrees(360.0))
        .expect("turn time");
    assert_relative_eq!(t.value, 20.0 * std::f64::consts::PI, max_relative = 1e-12);

    let e = wind_effect(Quantity::knots(30.0), Quantity::seconds(100.0)).expect("wind effect");
    assert_relative_eq!(e.value, kt_to_ms(30.0) * 100.0, max_relative = 1e-12);
}

proptest! {
    #[test]
    fn radius_is_positive_and_grows_with_speed(
        tas in 60.0f64..400.0,
        extra in 1.0f64..100.0,
        bank in 1.0f64..89.0,
    ) {
        let b = Quantity::degrees(bank);
        let slow = standard_rate_turn_radius(Quantity::knots(tas), b).unwrap().value;
        let fast = standard_rate_turn_radius(Quantity::knots(tas + extra), b).unwrap().value;
        prop_assert!(slow > 0.0);
        prop_assert!(fast > slow);
    }

    #[test]
    fn radius_shrinks_with_bank(
        tas in 60.0f64..400.0,
        bank in 1.0f64..80.0,
        extra in 1.0f64..9.0,
    ) {
        let v = Quantity::knots(tas);
        let shallow = standard_rate_turn_radius(v, Quantity::degrees(bank)).unwrap().value;
        let steep = standard_rate_turn_radius(v, Quantity::degrees(bank + extra)).unwrap().value;
        prop_assert!(steep < shallow);
    }
}
