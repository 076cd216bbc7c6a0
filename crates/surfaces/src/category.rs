use std::fmt;
use std::str::FromStr;

use crate::SurfaceError;
use crate::frame::LocalPoint;

/// Precision approach category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApproachCategory {
    CatI,
    CatII,
    CatIII,
}

impl ApproachCategory {
    pub fn label(self) -> &'static str {
        match self {
            ApproachCategory::CatI => "CAT I",
            ApproachCategory::CatII => "CAT II",
            ApproachCategory::CatIII => "CAT III",
        }
    }
}

impl fmt::Display for ApproachCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ApproachCategory {
    type Err = SurfaceError;

    /// Accepts `CAT I`, `cat ii`, `CAT-III`, `I`, `2`, ...; nothing else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();
        let grade = compact.strip_prefix("CAT").unwrap_or(&compact);
        match grade {
            "I" | "1" => Ok(ApproachCategory::CatI),
            "II" | "2" => Ok(ApproachCategory::CatII),
            "III" | "3" => Ok(ApproachCategory::CatIII),
            _ => Err(SurfaceError::InvalidCategory(s.to_string())),
        }
    }
}

/// Basic ILS surface dimensions. Slopes and divergences are ratios, lengths metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryProfile {
    pub ground_before_threshold_m: f64,
    pub ground_after_threshold_m: f64,
    pub inner_half_width_m: f64,
    pub approach_divergence: f64,
    pub approach_first_length_m: f64,
    pub approach_first_slope: f64,
    pub approach_second_length_m: f64,
    pub approach_second_slope: f64,
    /// Run past the ground surface over which the missed approach edge follows the transitional surface.
    pub missed_first_length_m: f64,
    pub missed_total_length_m: f64,
    pub missed_slope: f64,
    pub missed_divergence: f64,
    pub transitional_slope: f64,
    pub transitional_ceiling_m: f64,
}

const PRECISION_BASIC: CategoryProfile = CategoryProfile {
    ground_before_threshold_m: 60.0,
    ground_after_threshold_m: 900.0,
    inner_half_width_m: 150.0,
    approach_divergence: 0.15,
    approach_first_length_m: 3_000.0,
    approach_first_slope: 0.02,
    approach_second_length_m: 9_600.0,
    approach_second_slope: 0.025,
    missed_first_length_m: 1_800.0,
    missed_total_length_m: 12_000.0,
    missed_slope: 0.025,
    missed_divergence: 0.25,
    transitional_slope: 0.143,
    transitional_ceiling_m: 300.0,
};

// The basic surfaces do not vary between precision categories.
static CAT_I_BASIC: CategoryProfile = PRECISION_BASIC;
static CAT_II_BASIC: CategoryProfile = PRECISION_BASIC;
static CAT_III_BASIC: CategoryProfile = PRECISION_BASIC;

/// Basic surface dimensions for a category.
pub fn category_profile(category: ApproachCategory) -> &'static CategoryProfile {
    match category {
        ApproachCategory::CatI => &CAT_I_BASIC,
        ApproachCategory::CatII => &CAT_II_BASIC,
        ApproachCategory::CatIII => &CAT_III_BASIC,
    }
}

/// Left-hand OAS template points; the right-hand side is the mirror image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OasTemplate {
    pub c: LocalPoint,
    pub d: LocalPoint,
    pub e: LocalPoint,
    pub c_prime: LocalPoint,
    pub d_prime: LocalPoint,
    pub e_prime: LocalPoint,
}

// CAT I, 3° glide path, 15 m RDH, 300 m localizer-threshold distance.
const CAT_I_TEMPLATE: OasTemplate = OasTemplate {
    c: LocalPoint::new(264.912_280_701_755, 51.500_623_171_803_3, 0.0),
    d: LocalPoint::new(-314.787_533_274_559, 139.427_992_202_075, 0.0),
    e: LocalPoint::new(-900.0, 206.146_545_264_64, 0.0),
    c_prime: LocalPoint::new(16_260.701_754_386, 23.230_294_510_274_2, 455.88),
    d_prime: LocalPoint::new(8_383.827_710_782_59, 1_217.974_184_604_36, 455.88),
    e_prime: LocalPoint::new(-12_900.0, 2_936.602_256_987_81, 300.0),
};

static OAS_TEMPLATES: [(ApproachCategory, OasTemplate); 1] = [(ApproachCategory::CatI, CAT_I_TEMPLATE)];

/// OAS template for a category. Only CAT I carries one.
pub fn oas_template(category: ApproachCategory) -> Result<&'static OasTemplate, SurfaceError> {
    OAS_TEMPLATES
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, t)| t)
        .ok_or_else(|| SurfaceError::InvalidCategory(category.label().to_string()))
}
