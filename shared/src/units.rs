//! Unit normalization for onboarding measurements
//!
//! Height and weight arrive from the questionnaire as free-form strings plus a
//! unit tag. Everything downstream of this module works in centimeters and
//! kilograms.
//!
//! # Design Principles
//!
//! 1. **Lenient Parsing**: Strings are read like a form field; no number means NaN
//! 2. **No Errors**: NaN propagates, validation is the caller's job
//! 3. **Conversion at Boundaries**: Convert once on input, not in business logic

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

const CM_PER_INCH: f64 = 2.54;
const INCHES_PER_FOOT: f64 = 12.0;
const KG_PER_LB: f64 = 0.453592;

// ============================================================================
// Number Parsing
// ============================================================================

/// Parse the leading decimal number of a form value.
///
/// Surrounding whitespace is ignored and trailing text is dropped, so
/// `"180cm"` reads as `180`. A string without a leading number yields NaN.
pub fn parse_decimal(raw: &str) -> f64 {
    static LEADING_NUMBER: OnceLock<Regex> = OnceLock::new();
    let pattern = LEADING_NUMBER.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap()
    });

    pattern
        .find(raw.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

// ============================================================================
// Weight Units
// ============================================================================

/// Weight unit used by the questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "&'static str")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Read a unit tag. Anything that is not a kilogram tag means pounds.
    pub fn from_form_value(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => WeightUnit::Kg,
            _ => WeightUnit::Lbs,
        }
    }

    /// Convert from this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value * KG_PER_LB,
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl From<String> for WeightUnit {
    fn from(value: String) -> Self {
        Self::from_form_value(&value)
    }
}

impl From<WeightUnit> for &'static str {
    fn from(unit: WeightUnit) -> Self {
        unit.abbreviation()
    }
}

/// Parse a weight string and convert it to kilograms
pub fn weight_to_kg(raw: &str, unit: WeightUnit) -> f64 {
    unit.to_kg(parse_decimal(raw))
}

// ============================================================================
// Height Units
// ============================================================================

/// Height unit used by the questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "&'static str")]
pub enum HeightUnit {
    #[default]
    Cm,
    /// Feet, optionally followed by inches (`5'10`, `5.10`)
    Ft,
}

impl HeightUnit {
    /// Read a unit tag. Anything that is not a feet tag means centimeters.
    pub fn from_form_value(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "ft" | "feet" | "ft/in" | "feet/inches" => HeightUnit::Ft,
            _ => HeightUnit::Cm,
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Ft => "ft",
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl From<String> for HeightUnit {
    fn from(value: String) -> Self {
        Self::from_form_value(&value)
    }
}

impl From<HeightUnit> for &'static str {
    fn from(unit: HeightUnit) -> Self {
        unit.abbreviation()
    }
}

/// Parse a height string and convert it to centimeters
pub fn height_to_cm(raw: &str, unit: HeightUnit) -> f64 {
    match unit {
        HeightUnit::Cm => parse_decimal(raw),
        HeightUnit::Ft => FeetInchesHeight::parse(raw).to_cm(),
    }
}

// ============================================================================
// Feet/Inches Height
// ============================================================================

/// Height written as feet and inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeetInchesHeight {
    pub feet: f64,
    pub inches: f64,
}

impl FeetInchesHeight {
    /// Read a feet value as typed into the questionnaire.
    ///
    /// Double quotes are dropped and a single quote separates feet from
    /// inches just like a decimal point does: `5.8` is 5 ft 8 in and
    /// `5.10`, `5'10` and `5'10"` are all 5 ft 10 in. Without a separator the
    /// whole value counts as feet.
    pub fn parse(raw: &str) -> Self {
        let cleaned: String = raw
            .chars()
            .filter(|c| *c != '"')
            .map(|c| if c == '\'' { '.' } else { c })
            .collect();

        match cleaned.split_once('.') {
            Some((feet, inches)) => {
                let inches = if inches.trim().is_empty() {
                    0.0
                } else {
                    parse_decimal(inches)
                };
                Self {
                    feet: parse_decimal(feet),
                    inches,
                }
            }
            None => Self {
                feet: parse_decimal(&cleaned),
                inches: 0.0,
            },
        }
    }

    /// Convert to total inches
    pub fn to_total_inches(&self) -> f64 {
        self.feet * INCHES_PER_FOOT + self.inches
    }

    /// Convert to centimeters
    pub fn to_cm(&self) -> f64 {
        self.to_total_inches() * CM_PER_INCH
    }
}

impl fmt::Display for FeetInchesHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'{}\"", self.feet, self.inches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    // =========================================================================
    // Number Parsing Tests
    // =========================================================================

    #[rstest]
    #[case("180", 180.0)]
    #[case(" 72.5 ", 72.5)]
    #[case("180cm", 180.0)]
    #[case(".5", 0.5)]
    #[case("-3", -3.0)]
    #[case("1e2", 100.0)]
    fn test_parse_decimal(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(parse_decimal(raw), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("abc")]
    #[case("cm180")]
    fn test_parse_decimal_without_number_is_nan(#[case] raw: &str) {
        assert!(parse_decimal(raw).is_nan());
    }

    // =========================================================================
    // Height Tests
    // =========================================================================

    #[test]
    fn test_height_in_cm_is_parsed_directly() {
        assert_eq!(height_to_cm("180", HeightUnit::Cm), 180.0);
    }

    #[test]
    fn test_height_feet_dot_inches() {
        let expected = (5.0 * 12.0 + 10.0) * 2.54;
        assert!((height_to_cm("5.10", HeightUnit::Ft) - expected).abs() < 1e-9);

        // 5.8 is 5 ft 8 in, not 5.8 ft
        let expected = (5.0 * 12.0 + 8.0) * 2.54;
        assert!((height_to_cm("5.8", HeightUnit::Ft) - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case("5'10")]
    #[case("5'10\"")]
    #[case("5' 10\"")]
    fn test_height_feet_quote_inches(#[case] raw: &str) {
        assert!((height_to_cm(raw, HeightUnit::Ft) - 177.8).abs() < 1e-9);
    }

    #[test]
    fn test_height_plain_feet() {
        assert!((height_to_cm("6", HeightUnit::Ft) - 182.88).abs() < 1e-9);
        assert!((height_to_cm("6'", HeightUnit::Ft) - 182.88).abs() < 1e-9);
    }

    #[test]
    fn test_height_garbage_is_nan() {
        assert!(height_to_cm("tall", HeightUnit::Ft).is_nan());
        assert!(height_to_cm("", HeightUnit::Cm).is_nan());
    }

    #[test]
    fn test_feet_inches_display() {
        let height = FeetInchesHeight::parse("6'2");
        assert_eq!(format!("{}", height), "6'2\"");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: plain feet values scale by 30.48
        #[test]
        fn prop_plain_feet_scale(feet in 3u32..8) {
            let cm = height_to_cm(&feet.to_string(), HeightUnit::Ft);
            prop_assert!((cm - feet as f64 * 30.48).abs() < 1e-9);
        }

        /// Property: more inches means taller
        #[test]
        fn prop_inches_increase_height(feet in 4u32..7, inches in 0u32..11) {
            let shorter = height_to_cm(&format!("{}'{}", feet, inches), HeightUnit::Ft);
            let taller = height_to_cm(&format!("{}'{}", feet, inches + 1), HeightUnit::Ft);
            prop_assert!(taller > shorter);
        }
    }

    // =========================================================================
    // Weight Tests
    // =========================================================================

    #[test]
    fn test_known_weight_conversions() {
        assert!((weight_to_kg("150", WeightUnit::Lbs) - 68.04).abs() < 0.01);
        assert_eq!(weight_to_kg("70", WeightUnit::Kg), 70.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_weight_roundtrip_lbs(lbs in 44.0f64..1100.0) {
            let kg = WeightUnit::Lbs.to_kg(lbs);
            prop_assert!((lbs - kg / KG_PER_LB).abs() < 0.0001);
        }
    }

    // =========================================================================
    // Unit Tag Tests
    // =========================================================================

    #[test]
    fn test_unit_tags() {
        assert_eq!(WeightUnit::from_form_value("KG"), WeightUnit::Kg);
        assert_eq!(WeightUnit::from_form_value("lbs"), WeightUnit::Lbs);
        assert_eq!(WeightUnit::from_form_value("stone"), WeightUnit::Lbs);
        assert_eq!(HeightUnit::from_form_value("ft"), HeightUnit::Ft);
        assert_eq!(HeightUnit::from_form_value("cm"), HeightUnit::Cm);
        assert_eq!(HeightUnit::from_form_value("furlongs"), HeightUnit::Cm);
    }

    #[test]
    fn test_unit_serde() {
        let unit: HeightUnit = serde_json::from_str("\"ft\"").unwrap();
        assert_eq!(unit, HeightUnit::Ft);
        assert_eq!(serde_json::to_string(&WeightUnit::Lbs).unwrap(), "\"lbs\"");
    }
}
