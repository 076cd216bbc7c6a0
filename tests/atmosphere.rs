use approx::assert_relative_eq;
use procedure_surfaces::atmosphere::{
    MAX_ELEVATION_FT, MIN_ELEVATION_FT, isa_conditions, isa_deviation, isa_temperature,
};
use procedure_surfaces::core::{InputError, Quantity};
use proptest::prelude::*;

#[test]
fn sea_level_is_fifteen_degrees() {
    let t = isa_temperature(Quantity::feet(0.0)).expect("isa at sea level");
    assert_relative_eq!(t.value, 15.0);
}

#[test]
fn temperature_falls_1_98_degrees_per_thousand_feet() {
    let t = isa_temperature(Quantity::feet(1_000.0)).expect("isa");
    assert_relative_eq!(t.value, 13.02, epsilon = 1e-12);

    let tropopause = isa_temperature(Quantity::feet(MAX_ELEVATION_FT)).expect("isa at tropopause");
    assert_relative_eq!(tropopause.value, 15.0 - 0.001_98 * 36_089.0, epsilon = 1e-9);
}

#[test]
fn metre_elevations_are_converted_before_lapse() {
    let t = isa_temperature(Quantity::meters(1_000.0)).expect("isa");
    assert_relative_eq!(t.value, 8.503_937_007_874, epsilon = 1e-9);
}

#[test]
fn deviation_is_reference_minus_isa() {
    let dev = isa_deviation(Quantity::celsius(20.0), Quantity::feet(1_000.0)).expect("deviation");
    assert_relative_eq!(dev.value, 6.98, epsilon = 1e-12);

    let conditions = isa_conditions(Quantity::feet(1_000.0), Quantity::celsius(20.0)).expect("conditions");
    assert_eq!(conditions.elevation, Quantity::feet(1_000.0));
    assert_relative_eq!(conditions.isa_temperature.value + conditions.deviation.value, 20.0);
}

#[test]
fn elevations_outside_operational_range_are_rejected() {
    for ft in [MAX_ELEVATION_FT + 1.0, 40_000.0, MIN_ELEVATION_FT - 1.0] {
        let err = isa_temperature(Quantity::feet(ft)).expect_err("out of range");
        assert!(matches!(err, InputError::OutOfRange { .. }), "unexpected error: {err:?}");
        assert!(err.to_string().contains("elevation"));
    }
    assert!(isa_temperature(Quantity::feet(MIN_ELEVATION_FT)).is_ok());
}

#[test]
fn non_finite_and_mistyped_inputs_are_rejected() {
    let err = isa_temperature(Quantity::feet(f64::NAN)).expect_err("NaN elevation");
    assert!(matches!(err, InputError::NonFinite { .. }));

    let err = isa_conditions(Quantity::feet(0.0), Quantity::knots(15.0)).expect_err("speed as temperature");
    assert!(matches!(err, InputError::UnitMismatch { .. }));
}

proptest! {
    #[test]
    fn isa_temperature_never_rises_with_elevation(
        a in MIN_ELEVATION_FT..=MAX_ELEVATION_FT,
        b in MIN_ELEVATION_FT..=MAX_ELEVATION_FT,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let t_low = isa_temperature(Quantity::feet(low)).unwrap().value;
        let t_high = isa_temperature(Quantity::feet(high)).unwrap().value;
        prop_assert!(t_high <= t_low);
    }
}
