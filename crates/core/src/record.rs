use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of calculations the engine knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CalculationType {
    #[serde(rename = "Wind Spiral")]
    WindSpiral,
    #[serde(rename = "Basic ILS")]
    IlsBasicSurfaces,
    #[serde(rename = "OAS ILS CAT I")]
    IlsOasCategoryI,
    #[serde(rename = "VSS Straight")]
    Vss,
    #[serde(rename = "VSS LOC")]
    VssLoc,
}

impl CalculationType {
    pub const ALL: [CalculationType; 5] = [
        CalculationType::WindSpiral,
        CalculationType::IlsBasicSurfaces,
        CalculationType::IlsOasCategoryI,
        CalculationType::Vss,
        CalculationType::VssLoc,
    ];

    /// Discriminator stored alongside exported features.
    pub fn name(self) -> &'static str {
        match self {
            CalculationType::WindSpiral => "Wind Spiral",
            CalculationType::IlsBasicSurfaces => "Basic ILS",
            CalculationType::IlsOasCategoryI => "OAS ILS CAT I",
            CalculationType::Vss => "VSS Straight",
            CalculationType::VssLoc => "VSS LOC",
        }
    }

    /// File-name friendly identifier.
    pub fn slug(self) -> &'static str {
        match self {
            CalculationType::WindSpiral => "wind_spiral",
            CalculationType::IlsBasicSurfaces => "basic_ils",
            CalculationType::IlsOasCategoryI => "oas_ils_cat_i",
            CalculationType::Vss => "vss_straight",
            CalculationType::VssLoc => "vss_loc",
        }
    }

    /// Heading printed above a rendered parameter table.
    pub fn report_heading(self) -> &'static str {
        match self {
            CalculationType::WindSpiral => "WIND SPIRAL PARAMETERS",
            CalculationType::IlsBasicSurfaces => "BASIC ILS PARAMETERS",
            CalculationType::IlsOasCategoryI => "OAS ILS PARAMETERS",
            CalculationType::Vss => "VSS STRAIGHT PARAMETERS",
            CalculationType::VssLoc => "VSS LOC PARAMETERS",
        }
    }

    /// Match a display name or slug, ignoring case. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<CalculationType> {
        let wanted = name.trim();
        Self::ALL.into_iter().find(|ct| {
            ct.name().eq_ignore_ascii_case(wanted) || ct.slug().eq_ignore_ascii_case(wanted)
        })
    }
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One `(PARAMETER, VALUE, UNIT)` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterEntry {
    pub parameter: String,
    pub value: String,
    pub unit: String,
}

impl ParameterEntry {
    pub fn new(parameter: &str, value: impl Into<String>, unit: &str) -> Self {
        Self {
            parameter: parameter.to_string(),
            value: value.into(),
            unit: unit.to_string(),
        }
    }

    /// Numeric value when the row holds a number.
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.trim().parse().ok()
    }
}

/// Ordered parameter rows tagged with the calculation that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRecord {
    calculation_type: CalculationType,
    entries: Vec<ParameterEntry>,
}

impl ParameterRecord {
    pub fn new(calculation_type: CalculationType, entries: Vec<ParameterEntry>) -> Self {
        Self {
            calculation_type,
            entries,
        }
    }

    pub fn calculation_type(&self) -> CalculationType {
        self.calculation_type
    }

    pub fn entries(&self) -> &[ParameterEntry] {
        &self.entries
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.parameter.as_str()).collect()
    }

    pub fn get(&self, label: &str) -> Option<&ParameterEntry> {
        self.entries.iter().find(|e| e.parameter == label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
