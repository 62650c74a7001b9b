//! Daily water target
//!
//! Base formula: 1 L per 30 kg of body weight, scaled by activity and topped
//! up for the goal. The extended formula also adjusts for age and gender and
//! keeps the result between 2.0 and 4.5 litres.

use crate::numeric::round_half_up;
use crate::profile::{ActivityLevel, BodyMetrics, Gender, PrimaryGoal};
use serde::{Deserialize, Serialize};

pub const KG_PER_LITRE: f64 = 30.0;
pub const MIN_WATER_LITRES: f64 = 2.0;
pub const MAX_WATER_LITRES: f64 = 4.5;

/// Which water formula the calculator uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WaterFormula {
    /// Age and gender adjusted, clamped to 2.0-4.5 L
    #[default]
    Extended,
    /// Weight, activity and goal only, unclamped
    Simplified,
}

impl WaterFormula {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaterFormula::Extended => "extended",
            WaterFormula::Simplified => "simplified",
        }
    }
}

impl std::str::FromStr for WaterFormula {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "extended" => Ok(WaterFormula::Extended),
            "simplified" => Ok(WaterFormula::Simplified),
            other => Err(format!("unknown water formula: {}", other)),
        }
    }
}

/// Activity multiplier for water intake
pub fn activity_water_factor(activity_level: ActivityLevel) -> f64 {
    match activity_level {
        ActivityLevel::Sedentary | ActivityLevel::Unrecognized => 1.0,
        ActivityLevel::LightlyActive => 1.1,
        ActivityLevel::ModeratelyActive => 1.2,
        ActivityLevel::VeryActive => 1.3,
        ActivityLevel::ExtremelyActive => 1.4,
    }
}

/// Extra litres for the goal
pub fn goal_water_addend(goal: PrimaryGoal) -> f64 {
    match goal {
        PrimaryGoal::WeightLoss => 0.5,
        PrimaryGoal::MuscleGain => 0.75,
        PrimaryGoal::Maintenance | PrimaryGoal::Unrecognized => 0.0,
    }
}

/// Extra litres by age: 31-50 adds 0.25, 51 and up adds 0.5
///
/// Fractional ages stay in the band of the last completed birthday.
pub fn age_water_addend(age_years: f64) -> f64 {
    if age_years >= 51.0 {
        0.5
    } else if age_years >= 31.0 {
        0.25
    } else {
        0.0
    }
}

/// Gender multiplier for water intake
pub fn gender_water_factor(gender: Gender) -> f64 {
    match gender {
        Gender::Female => 0.9,
        Gender::Other | Gender::PreferNotToSay => 0.95,
        Gender::Male | Gender::Unrecognized => 1.0,
    }
}

/// Recommended daily water in litres, unrounded
pub fn calculate_water_litres(formula: WaterFormula, metrics: &BodyMetrics) -> f64 {
    let base = metrics.weight_kg / KG_PER_LITRE * activity_water_factor(metrics.activity_level)
        + goal_water_addend(metrics.goal);

    match formula {
        WaterFormula::Simplified => base,
        WaterFormula::Extended => {
            let adjusted =
                (base + age_water_addend(metrics.age_years)) * gender_water_factor(metrics.gender);
            // clamp keeps NaN
            adjusted.clamp(MIN_WATER_LITRES, MAX_WATER_LITRES)
        }
    }
}

/// Recommended daily water in whole millilitres
pub fn calculate_water_target_ml(formula: WaterFormula, metrics: &BodyMetrics) -> f64 {
    round_half_up(calculate_water_litres(formula, metrics) * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Timeline;
    use proptest::prelude::*;
    use rstest::rstest;

    fn metrics(weight_kg: f64, age_years: f64, gender: Gender) -> BodyMetrics {
        BodyMetrics {
            age_years,
            height_cm: 170.0,
            weight_kg,
            target_weight_kg: f64::NAN,
            gender,
            activity_level: ActivityLevel::Sedentary,
            goal: PrimaryGoal::Maintenance,
            timeline: Timeline::Moderate,
        }
    }

    #[test]
    fn test_simplified_formula() {
        // 90 kg sedentary maintenance -> 3.0 L
        let m = metrics(90.0, 40.0, Gender::Female);
        assert_eq!(calculate_water_target_ml(WaterFormula::Simplified, &m), 3000.0);

        // 60 kg very active muscle gain -> 2.0 * 1.3 + 0.75
        let mut m = metrics(60.0, 25.0, Gender::Male);
        m.activity_level = ActivityLevel::VeryActive;
        m.goal = PrimaryGoal::MuscleGain;
        assert_eq!(calculate_water_target_ml(WaterFormula::Simplified, &m), 3350.0);
    }

    #[test]
    fn test_simplified_formula_is_unclamped() {
        let m = metrics(45.0, 25.0, Gender::Female);
        assert_eq!(calculate_water_target_ml(WaterFormula::Simplified, &m), 1500.0);

        let mut m = metrics(180.0, 25.0, Gender::Male);
        m.activity_level = ActivityLevel::ExtremelyActive;
        assert_eq!(calculate_water_target_ml(WaterFormula::Simplified, &m), 8400.0);
    }

    #[test]
    fn test_extended_formula_adjustments() {
        // 75 kg, 60 years, other: (2.5 + 0.5) * 0.95 = 2.85
        let m = metrics(75.0, 60.0, Gender::Other);
        assert_eq!(calculate_water_target_ml(WaterFormula::Extended, &m), 2850.0);

        // 90 kg, 45 years, female: (3.0 + 0.25) * 0.9 = 2.925
        let m = metrics(90.0, 45.0, Gender::Female);
        assert_eq!(calculate_water_target_ml(WaterFormula::Extended, &m), 2925.0);

        // 90 kg, 60 years, female: (3.0 + 0.5) * 0.9 = 3.15
        let m = metrics(90.0, 60.0, Gender::Female);
        assert_eq!(calculate_water_target_ml(WaterFormula::Extended, &m), 3150.0);
    }

    #[rstest]
    #[case(45.0, 2000.0)]
    #[case(60.0, 2000.0)]
    #[case(180.0, 4500.0)]
    fn test_extended_clamp_edges(#[case] weight_kg: f64, #[case] expected: f64) {
        let m = metrics(weight_kg, 25.0, Gender::Male);
        assert_eq!(calculate_water_target_ml(WaterFormula::Extended, &m), expected);
    }

    #[rstest]
    #[case(30.0, 0.0)]
    #[case(30.5, 0.0)]
    #[case(31.0, 0.25)]
    #[case(50.0, 0.25)]
    #[case(50.5, 0.25)]
    #[case(51.0, 0.5)]
    #[case(f64::NAN, 0.0)]
    fn test_age_addend_boundaries(#[case] age: f64, #[case] expected: f64) {
        assert_eq!(age_water_addend(age), expected);
    }

    #[test]
    fn test_nan_weight_propagates_through_clamp() {
        let m = metrics(f64::NAN, 25.0, Gender::Male);
        assert!(calculate_water_target_ml(WaterFormula::Extended, &m).is_nan());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: the extended formula always lands in 2000-4500 ml
        #[test]
        fn prop_extended_within_bounds(
            weight in 20.0f64..500.0,
            age in 1.0f64..120.0,
            activity in 0usize..5,
            goal in 0usize..3,
            gender in 0usize..4
        ) {
            let mut m = metrics(weight, age, [Gender::Male, Gender::Female, Gender::Other, Gender::Unrecognized][gender]);
            m.activity_level = ActivityLevel::ALL[activity];
            m.goal = [PrimaryGoal::WeightLoss, PrimaryGoal::MuscleGain, PrimaryGoal::Maintenance][goal];
            let ml = calculate_water_target_ml(WaterFormula::Extended, &m);
            prop_assert!((2000.0..=4500.0).contains(&ml), "water target {} out of bounds", ml);
        }

        /// Property: more active means more water
        #[test]
        fn prop_activity_increases_water(weight in 50.0f64..100.0) {
            let mut sedentary = metrics(weight, 25.0, Gender::Male);
            let mut active = sedentary;
            sedentary.activity_level = ActivityLevel::Sedentary;
            active.activity_level = ActivityLevel::VeryActive;
            let low = calculate_water_litres(WaterFormula::Simplified, &sedentary);
            let high = calculate_water_litres(WaterFormula::Simplified, &active);
            prop_assert!(high > low);
        }
    }
}
