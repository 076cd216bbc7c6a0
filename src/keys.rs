//! Names of the scalars hosts place in a `ScalarInputSet`, and of derived scalars.

// Wind spiral inputs.
pub const AERODROME_ELEVATION: &str = "aerodrome_elevation";
pub const TEMPERATURE_REFERENCE: &str = "temperature_reference";
/// Optional manual ISA deviation; replaces the calculated one for the turn.
pub const ISA_VARIATION: &str = "isa_variation";
pub const IAS: &str = "ias";
pub const ALTITUDE: &str = "altitude";
pub const BANK_ANGLE: &str = "bank_angle";
pub const WIND_SPEED: &str = "wind_speed";
/// Optional; when absent the spiral assumes the most adverse wind at every point.
pub const WIND_DIRECTION: &str = "wind_direction";
pub const TURN_DIRECTION: &str = "turn_direction";
pub const START_X: &str = "start_x";
pub const START_Y: &str = "start_y";
pub const INITIAL_HEADING: &str = "initial_heading";
pub const SWEEP: &str = "sweep";

// Runway-referenced inputs.
pub const THRESHOLD_X: &str = "threshold_x";
pub const THRESHOLD_Y: &str = "threshold_y";
pub const THRESHOLD_ELEVATION: &str = "threshold_elevation";
pub const RUNWAY_BEARING: &str = "runway_bearing";
pub const THRESHOLD_DISPLACEMENT: &str = "threshold_displacement";
pub const APPROACH_CATEGORY: &str = "approach_category";
pub const OAS_TYPE: &str = "oas_type";
pub const FAP_ELEVATION: &str = "fap_elevation";
pub const MOC_INTERMEDIATE: &str = "moc_intermediate";
pub const RUNWAY_WIDTH: &str = "runway_width";
pub const STRIP_WIDTH: &str = "strip_width";
pub const OCH: &str = "och";
pub const RDH: &str = "rdh";
pub const VPA: &str = "vpa";
pub const EYE_TO_WHEEL_HEIGHT: &str = "eye_to_wheel_height";

// Derived scalars.
pub const ISA_TEMPERATURE: &str = "isa_temperature";
pub const ISA_DEVIATION: &str = "isa_deviation";
pub const TRUE_AIRSPEED: &str = "true_airspeed";
pub const TURN_RADIUS: &str = "turn_radius";
pub const RATE_OF_TURN: &str = "rate_of_turn";
pub const TURN_TIME: &str = "turn_time";
pub const WIND_EFFECT: &str = "wind_effect";
pub const MAX_DRIFT_ANGLE: &str = "max_drift_angle";
pub const MAX_GROUND_SPEED: &str = "max_ground_speed";
pub const INNER_HALF_WIDTH: &str = "inner_half_width";
pub const APPROACH_DIVERGENCE: &str = "approach_divergence";
pub const APPROACH_FIRST_SLOPE: &str = "approach_first_slope";
pub const APPROACH_SECOND_SLOPE: &str = "approach_second_slope";
pub const MISSED_APPROACH_SLOPE: &str = "missed_approach_slope";
pub const TRANSITIONAL_SLOPE: &str = "transitional_slope";
pub const OAS_CUTOFF_HEIGHT: &str = "oas_cutoff_height";
pub const VSS_SLOPE: &str = "vss_slope";
pub const VSS_LENGTH: &str = "vss_length";
pub const DECISION_POINT_DISTANCE: &str = "decision_point_distance";
pub const OCS_LENGTH: &str = "ocs_length";
