use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{InputError, ensure_finite};
use crate::units;

/// Physical dimension shared by a family of units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Length,
    Speed,
    Angle,
    AngularRate,
    Temperature,
    Time,
    Ratio,
}

/// Units accepted at the engine boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "ft")]
    Feet,
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "NM")]
    NauticalMiles,
    #[serde(rename = "kt")]
    Knots,
    #[serde(rename = "m/s")]
    MetersPerSecond,
    #[serde(rename = "deg", alias = "°")]
    Degrees,
    #[serde(rename = "rad")]
    Radians,
    #[serde(rename = "deg/s", alias = "°/s")]
    DegreesPerSecond,
    #[serde(rename = "degC", alias = "°C")]
    Celsius,
    #[serde(rename = "s")]
    Seconds,
    #[serde(rename = "%")]
    Percent,
}

impl Unit {
    pub fn dimension(self) -> Dimension {
        match self {
            Unit::Feet | Unit::Meters | Unit::NauticalMiles => Dimension::Length,
            Unit::Knots | Unit::MetersPerSecond => Dimension::Speed,
            Unit::Degrees | Unit::Radians => Dimension::Angle,
            Unit::DegreesPerSecond => Dimension::AngularRate,
            Unit::Celsius => Dimension::Temperature,
            Unit::Seconds => Dimension::Time,
            Unit::Percent => Dimension::Ratio,
        }
    }

    /// Symbol used in rendered parameter tables.
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Feet => "ft",
            Unit::Meters => "m",
            Unit::NauticalMiles => "NM",
            Unit::Knots => "kt",
            Unit::MetersPerSecond => "m/s",
            Unit::Degrees => "°",
            Unit::Radians => "rad",
            Unit::DegreesPerSecond => "°/s",
            Unit::Celsius => "°C",
            Unit::Seconds => "s",
            Unit::Percent => "%",
        }
    }

    // Base units: m, m/s, rad, °/s, °C, s, %.
    fn to_base(self, value: f64) -> f64 {
        match self {
            Unit::Feet => units::ft_to_m(value),
            Unit::NauticalMiles => units::nm_to_m(value),
            Unit::Knots => units::kt_to_ms(value),
            Unit::Degrees => units::deg_to_rad(value),
            _ => value,
        }
    }

    fn from_base(self, value: f64) -> f64 {
        match self {
            Unit::Feet => units::m_to_ft(value),
            Unit::NauticalMiles => units::m_to_nm(value),
            Unit::Knots => units::ms_to_kt(value),
            Unit::Degrees => units::rad_to_deg(value),
            _ => value,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim() {
            "ft" => Unit::Feet,
            "m" => Unit::Meters,
            "NM" => Unit::NauticalMiles,
            "kt" => Unit::Knots,
            "m/s" => Unit::MetersPerSecond,
            "°" | "deg" => Unit::Degrees,
            "rad" => Unit::Radians,
            "°/s" | "deg/s" => Unit::DegreesPerSecond,
            "°C" | "degC" => Unit::Celsius,
            "s" => Unit::Seconds,
            "%" => Unit::Percent,
            other => return Err(format!("unknown unit '{other}'")),
        };
        Ok(unit)
    }
}

/// A value tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Unit,
}

impl Quantity {
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub const fn feet(value: f64) -> Self {
        Self::new(value, Unit::Feet)
    }

    pub const fn meters(value: f64) -> Self {
        Self::new(value, Unit::Meters)
    }

    pub const fn knots(value: f64) -> Self {
        Self::new(value, Unit::Knots)
    }

    pub const fn meters_per_second(value: f64) -> Self {
        Self::new(value, Unit::MetersPerSecond)
    }

    pub const fn degrees(value: f64) -> Self {
        Self::new(value, Unit::Degrees)
    }

    pub const fn celsius(value: f64) -> Self {
        Self::new(value, Unit::Celsius)
    }

    pub const fn seconds(value: f64) -> Self {
        Self::new(value, Unit::Seconds)
    }

    pub const fn percent(value: f64) -> Self {
        Self::new(value, Unit::Percent)
    }

    /// Convert into another unit of the same dimension.
    pub fn convert(self, unit: Unit) -> Option<Quantity> {
        if self.unit == unit {
            return Some(self);
        }
        if self.unit.dimension() != unit.dimension() {
            return None;
        }
        Some(Quantity::new(unit.from_base(self.unit.to_base(self.value)), unit))
    }

    /// Value in `unit`, rejecting a foreign dimension or a non-finite value.
    pub fn expect_in(self, name: &str, unit: Unit) -> Result<f64, InputError> {
        let converted = self.convert(unit).ok_or_else(|| InputError::UnitMismatch {
            name: name.to_string(),
            expected: unit.symbol().to_string(),
            found: self.unit.symbol().to_string(),
        })?;
        ensure_finite(name, converted.value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// A single host-supplied scalar: a unit-tagged number or a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Quantity(Quantity),
    Text(String),
}

impl From<Quantity> for Scalar {
    fn from(q: Quantity) -> Self {
        Scalar::Quantity(q)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

/// Named, unit-tagged inputs handed to a builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScalarInputSet(BTreeMap<String, Scalar>);

impl ScalarInputSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert used by hosts and tests.
    pub fn with(mut self, key: &str, value: impl Into<Scalar>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Scalar>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Scalar> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw quantity as supplied, if the key holds one.
    pub fn quantity(&self, key: &str) -> Result<Option<Quantity>, InputError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(Scalar::Quantity(q)) => Ok(Some(*q)),
            Some(Scalar::Text(text)) => Err(InputError::UnitMismatch {
                name: key.to_string(),
                expected: "a number with a unit".to_string(),
                found: format!("text '{text}'"),
            }),
        }
    }

    /// Required quantity converted into `unit`.
    pub fn require_quantity(&self, key: &str, unit: Unit) -> Result<f64, InputError> {
        self.optional_quantity(key, unit)?
            .ok_or_else(|| InputError::Missing(key.to_string()))
    }

    pub fn optional_quantity(&self, key: &str, unit: Unit) -> Result<Option<f64>, InputError> {
        self.quantity(key)?
            .map(|q| q.expect_in(key, unit))
            .transpose()
    }

    pub fn require_text(&self, key: &str) -> Result<&str, InputError> {
        self.optional_text(key)?
            .ok_or_else(|| InputError::Missing(key.to_string()))
    }

    pub fn optional_text(&self, key: &str) -> Result<Option<&str>, InputError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(Scalar::Text(text)) => Ok(Some(text.as_str())),
            Some(Scalar::Quantity(q)) => Err(InputError::UnitMismatch {
                name: key.to_string(),
                expected: "a text label".to_string(),
                found: q.to_string(),
            }),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Scalar)> for ScalarInputSet {
    fn from_iter<I: IntoIterator<Item = (K, Scalar)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Quantities computed from a [`ScalarInputSet`], keyed like the inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivedScalarSet(BTreeMap<String, Quantity>);

impl DerivedScalarSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: Quantity) {
        self.0.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<Quantity> {
        self.0.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Quantity)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
