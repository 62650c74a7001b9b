//! Nutrition plan calculator
//!
//! Runs the five calculator stages in order:
//!
//! 1. Unit normalization ([`UserProfileInput::body_metrics`])
//! 2. BMR ([`calculate_bmr`])
//! 3. TDEE ([`calculate_tdee`])
//! 4. Target calories ([`calculate_target_calories`])
//! 5. Macro split and water target ([`split_macros`], [`calculate_water_target_ml`])
//!
//! The pipeline itself never fails. Unparseable numbers flow through as NaN
//! into [`PlanFigures`]; converting those into a [`NutritionPlan`] is where a
//! [`PlanError`] can surface.

use crate::energy::{calculate_bmr, calculate_target_calories, calculate_tdee, CaloriePolicy};
use crate::errors::PlanError;
use crate::hydration::{calculate_water_target_ml, WaterFormula};
use crate::macros::{split_macros, CarbPolicy};
use crate::numeric::round_half_up;
use crate::profile::UserProfileInput;
use serde::{Deserialize, Serialize};

// ============================================================================
// Calculator Options
// ============================================================================

/// Strategy choices for one calculator instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CalculatorOptions {
    pub calorie_policy: CaloriePolicy,
    pub carb_policy: CarbPolicy,
    pub water_formula: WaterFormula,
}

// ============================================================================
// Plan Types
// ============================================================================

/// Daily nutrition prescription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionPlan {
    pub bmr: i32,
    pub tdee: i32,
    pub target_calories: i32,
    pub protein_grams: i32,
    pub carbs_grams: i32,
    pub fats_grams: i32,
    pub protein_calories: i32,
    pub carbs_calories: i32,
    pub fats_calories: i32,
    pub protein_percentage: i32,
    pub carbs_percentage: i32,
    pub fats_percentage: i32,
    /// Millilitres per day
    pub water_target: i32,
}

/// Rounded calculator output before the finiteness check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanFigures {
    pub bmr: f64,
    pub tdee: f64,
    pub target_calories: f64,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fats_grams: f64,
    pub protein_calories: f64,
    pub carbs_calories: f64,
    pub fats_calories: f64,
    pub protein_percentage: f64,
    pub carbs_percentage: f64,
    pub fats_percentage: f64,
    pub water_target: f64,
}

impl PlanFigures {
    fn named_fields(&self) -> [(&'static str, f64); 13] {
        [
            ("bmr", self.bmr),
            ("tdee", self.tdee),
            ("target_calories", self.target_calories),
            ("protein_grams", self.protein_grams),
            ("carbs_grams", self.carbs_grams),
            ("fats_grams", self.fats_grams),
            ("protein_calories", self.protein_calories),
            ("carbs_calories", self.carbs_calories),
            ("fats_calories", self.fats_calories),
            ("protein_percentage", self.protein_percentage),
            ("carbs_percentage", self.carbs_percentage),
            ("fats_percentage", self.fats_percentage),
            ("water_target", self.water_target),
        ]
    }

    /// Names of the fields holding NaN or infinity, in plan order
    pub fn non_finite_fields(&self) -> Vec<&'static str> {
        self.named_fields()
            .into_iter()
            .filter(|(_, value)| !value.is_finite())
            .map(|(name, _)| name)
            .collect()
    }

    /// Names of finite fields that do not fit in an `i32`, in plan order
    pub fn out_of_range_fields(&self) -> Vec<&'static str> {
        let range = i32::MIN as f64..=i32::MAX as f64;
        self.named_fields()
            .into_iter()
            .filter(|(_, value)| value.is_finite() && !range.contains(value))
            .map(|(name, _)| name)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.named_fields().iter().all(|(_, value)| value.is_finite())
    }
}

impl TryFrom<PlanFigures> for NutritionPlan {
    type Error = PlanError;

    fn try_from(figures: PlanFigures) -> Result<Self, Self::Error> {
        let fields = figures.non_finite_fields();
        if !fields.is_empty() {
            return Err(PlanError::NonFinite { fields });
        }
        let fields = figures.out_of_range_fields();
        if !fields.is_empty() {
            return Err(PlanError::OutOfRange { fields });
        }

        // whole numbers within i32 range from here on
        Ok(NutritionPlan {
            bmr: figures.bmr as i32,
            tdee: figures.tdee as i32,
            target_calories: figures.target_calories as i32,
            protein_grams: figures.protein_grams as i32,
            carbs_grams: figures.carbs_grams as i32,
            fats_grams: figures.fats_grams as i32,
            protein_calories: figures.protein_calories as i32,
            carbs_calories: figures.carbs_calories as i32,
            fats_calories: figures.fats_calories as i32,
            protein_percentage: figures.protein_percentage as i32,
            carbs_percentage: figures.carbs_percentage as i32,
            fats_percentage: figures.fats_percentage as i32,
            water_target: figures.water_target as i32,
        })
    }
}

// ============================================================================
// Calculator
// ============================================================================

/// Pure, stateless calculator; cheap to copy into every request handler
#[derive(Debug, Clone, Copy, Default)]
pub struct NutritionPlanCalculator {
    options: CalculatorOptions,
}

impl NutritionPlanCalculator {
    pub fn new(options: CalculatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> CalculatorOptions {
        self.options
    }

    /// Run the whole pipeline. Never fails; bad numbers become NaN.
    pub fn figures(&self, input: &UserProfileInput) -> PlanFigures {
        let metrics = input.body_metrics();

        let bmr = calculate_bmr(
            metrics.weight_kg,
            metrics.height_cm,
            metrics.age_years,
            metrics.gender,
        );
        let tdee = calculate_tdee(bmr, metrics.activity_level);
        let target_calories = calculate_target_calories(self.options.calorie_policy, tdee, &metrics);
        let macros = split_macros(
            target_calories,
            metrics.weight_kg,
            metrics.goal,
            self.options.carb_policy,
        );
        let water_target = calculate_water_target_ml(self.options.water_formula, &metrics);

        PlanFigures {
            bmr: round_half_up(bmr),
            tdee: round_half_up(tdee),
            target_calories,
            protein_grams: macros.protein_grams,
            carbs_grams: macros.carbs_grams,
            fats_grams: macros.fats_grams,
            protein_calories: macros.protein_calories,
            carbs_calories: macros.carbs_calories,
            fats_calories: macros.fats_calories,
            protein_percentage: macros.protein_percentage,
            carbs_percentage: macros.carbs_percentage,
            fats_percentage: macros.fats_percentage,
            water_target,
        }
    }

    /// Calculate a plan, reporting every field that could not be computed
    pub fn calculate(&self, input: &UserProfileInput) -> Result<NutritionPlan, PlanError> {
        NutritionPlan::try_from(self.figures(input))
    }
}

/// Calculate a plan with the default options
pub fn calculate_nutrition_plan(input: &UserProfileInput) -> Result<NutritionPlan, PlanError> {
    NutritionPlanCalculator::default().calculate(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ActivityLevel, Gender, PrimaryGoal, Timeline};
    use crate::units::{HeightUnit, WeightUnit};
    use proptest::prelude::*;

    fn reference_input() -> UserProfileInput {
        UserProfileInput {
            age: "30".to_string(),
            gender: Gender::Male,
            height: "5'10".to_string(),
            height_unit: HeightUnit::Ft,
            weight: "180".to_string(),
            weight_unit: WeightUnit::Lbs,
            target_weight: Some("165".to_string()),
            activity_level: ActivityLevel::ModeratelyActive,
            primary_goal: PrimaryGoal::WeightLoss,
            timeline: Timeline::Moderate,
        }
    }

    fn options(
        calorie_policy: CaloriePolicy,
        carb_policy: CarbPolicy,
        water_formula: WaterFormula,
    ) -> CalculatorOptions {
        CalculatorOptions {
            calorie_policy,
            carb_policy,
            water_formula,
        }
    }

    // =========================================================================
    // End-to-End Tests
    // =========================================================================

    #[test]
    fn test_reference_scenario_activity_deficit() {
        let plan = calculate_nutrition_plan(&reference_input()).unwrap();

        assert_eq!(plan.bmr, 1783);
        assert_eq!(plan.tdee, 2763);
        assert_eq!(plan.target_calories, 2263);
        assert_eq!(plan.protein_grams, 163);
        assert_eq!(plan.protein_calories, 652);
        assert_eq!(plan.fats_calories, 566);
        assert_eq!(plan.fats_grams, 63);
        assert_eq!(plan.carbs_grams, 261);
        assert_eq!(plan.carbs_calories, 1044);
        assert_eq!(plan.protein_percentage, 29);
        assert_eq!(plan.carbs_percentage, 46);
        assert_eq!(plan.fats_percentage, 25);
        assert_eq!(plan.water_target, 3766);
    }

    #[test]
    fn test_reference_scenario_weight_delta() {
        let calculator = NutritionPlanCalculator::new(options(
            CaloriePolicy::WeightDelta,
            CarbPolicy::CalorieFloor,
            WaterFormula::Extended,
        ));
        let plan = calculator.calculate(&reference_input()).unwrap();

        // 15 lbs = 6.80388 kg; 6.80388 * 7700 / 30 = 1746.33
        assert_eq!(plan.tdee, 2763);
        assert_eq!(plan.target_calories, 1017);
        // remainder 1017 - 652 - 254 = 111, floored to 400 kcal
        assert_eq!(plan.carbs_grams, 100);
        assert_eq!(plan.carbs_calories, 400);
    }

    #[test]
    fn test_weight_delta_with_clamp_grams() {
        let calculator = NutritionPlanCalculator::new(options(
            CaloriePolicy::WeightDelta,
            CarbPolicy::ClampGrams,
            WaterFormula::Simplified,
        ));
        let plan = calculator.calculate(&reference_input()).unwrap();

        assert_eq!(plan.carbs_grams, 28);
        assert_eq!(plan.carbs_calories, 112);
        // 2.721552 * 1.2 + 0.5
        assert_eq!(plan.water_target, 3766);
    }

    #[test]
    fn test_maintenance_uses_tdee_under_both_policies() {
        let mut input = reference_input();
        input.primary_goal = PrimaryGoal::Maintenance;
        input.target_weight = Some("120".to_string());

        for policy in [CaloriePolicy::ActivityDeficit, CaloriePolicy::WeightDelta] {
            let calculator = NutritionPlanCalculator::new(options(
                policy,
                CarbPolicy::CalorieFloor,
                WaterFormula::Extended,
            ));
            let plan = calculator.calculate(&input).unwrap();
            assert_eq!(plan.target_calories, plan.tdee, "policy {:?}", policy);
        }
    }

    #[test]
    fn test_maintenance_without_target_weight() {
        let mut input = reference_input();
        input.primary_goal = PrimaryGoal::Maintenance;
        input.target_weight = None;

        let calculator = NutritionPlanCalculator::new(options(
            CaloriePolicy::WeightDelta,
            CarbPolicy::CalorieFloor,
            WaterFormula::Extended,
        ));
        assert!(calculator.calculate(&input).is_ok());
    }

    // =========================================================================
    // Degenerate Input Tests
    // =========================================================================

    #[test]
    fn test_empty_age_propagates_nan() {
        let mut input = reference_input();
        input.age = String::new();

        let figures = NutritionPlanCalculator::default().figures(&input);
        assert!(figures.bmr.is_nan());
        assert!(figures.tdee.is_nan());
        assert!(figures.target_calories.is_nan());
        assert_eq!(figures.protein_percentage, 0.0);
        assert_eq!(figures.carbs_percentage, 0.0);
        assert_eq!(figures.fats_percentage, 0.0);
        assert!(!figures.is_complete());
    }

    #[test]
    fn test_empty_age_is_reported_at_boundary() {
        let mut input = reference_input();
        input.age = String::new();

        let err = calculate_nutrition_plan(&input).unwrap_err();
        assert!(matches!(err, PlanError::NonFinite { .. }));
        assert_eq!(
            err.fields(),
            vec![
                "bmr",
                "tdee",
                "target_calories",
                "carbs_grams",
                "fats_grams",
                "carbs_calories",
                "fats_calories",
            ]
        );
    }

    #[test]
    fn test_huge_weight_is_out_of_range() {
        let mut input = reference_input();
        input.weight = "1e9".to_string();

        let figures = NutritionPlanCalculator::default().figures(&input);
        assert!(figures.is_complete());

        let err = NutritionPlan::try_from(figures).unwrap_err();
        assert!(matches!(err, PlanError::OutOfRange { .. }));
        assert!(err.fields().contains(&"bmr"));
        assert!(err.fields().contains(&"target_calories"));
        assert!(!err.fields().contains(&"protein_percentage"));
        assert!(err.to_string().contains("out-of-range"));
    }

    #[test]
    fn test_non_finite_is_reported_before_out_of_range() {
        let mut input = reference_input();
        input.weight = "1e9".to_string();
        input.age = String::new();

        let err = calculate_nutrition_plan(&input).unwrap_err();
        assert!(matches!(err, PlanError::NonFinite { .. }));
    }

    #[test]
    fn test_missing_target_weight_fails_weight_delta() {
        let mut input = reference_input();
        input.target_weight = Some(String::new());

        let calculator = NutritionPlanCalculator::new(options(
            CaloriePolicy::WeightDelta,
            CarbPolicy::CalorieFloor,
            WaterFormula::Extended,
        ));
        let err = calculator.calculate(&input).unwrap_err();
        assert!(err.to_string().contains("target_calories"));
        assert!(!err.to_string().contains("bmr"));
    }

    #[test]
    fn test_unknown_tags_fall_back() {
        let mut input = reference_input();
        input.gender = Gender::Unrecognized;
        input.activity_level = ActivityLevel::Unrecognized;
        input.timeline = Timeline::Unrecognized;

        let mut expected = reference_input();
        expected.gender = Gender::Female;
        expected.activity_level = ActivityLevel::ModeratelyActive;

        let actual = calculate_nutrition_plan(&input).unwrap();
        let reference = calculate_nutrition_plan(&expected).unwrap();
        assert_eq!(actual.bmr, reference.bmr);
        assert_eq!(actual.tdee, reference.tdee);
        assert_eq!(actual.target_calories, reference.target_calories);
    }

    #[test]
    fn test_identical_input_identical_output() {
        let calculator = NutritionPlanCalculator::default();
        let input = reference_input();
        assert_eq!(calculator.figures(&input), calculator.figures(&input));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let opts: CalculatorOptions =
            serde_json::from_str(r#"{"calorie_policy": "weight-delta"}"#).unwrap();
        assert_eq!(opts.calorie_policy, CaloriePolicy::WeightDelta);
        assert_eq!(opts.carb_policy, CarbPolicy::CalorieFloor);
        assert_eq!(opts.water_formula, WaterFormula::Extended);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: realistic questionnaires always produce a complete plan
        #[test]
        fn prop_valid_profiles_are_complete(
            age in 18u32..90,
            height in 140u32..210,
            weight in 45u32..160,
            activity in 0usize..5,
            female in any::<bool>()
        ) {
            let input = UserProfileInput {
                age: age.to_string(),
                gender: if female { Gender::Female } else { Gender::Male },
                height: height.to_string(),
                height_unit: HeightUnit::Cm,
                weight: weight.to_string(),
                weight_unit: WeightUnit::Kg,
                target_weight: None,
                activity_level: ActivityLevel::ALL[activity],
                primary_goal: PrimaryGoal::WeightLoss,
                timeline: Timeline::Aggressive,
            };
            let plan = calculate_nutrition_plan(&input);
            prop_assert!(plan.is_ok(), "{:?}", plan);
            let plan = plan.unwrap();
            let floor = if female { 1200 } else { 1500 };
            prop_assert!(plan.target_calories >= floor);
            prop_assert!((2000..=4500).contains(&plan.water_target));
        }
    }
}
