//! Macronutrient split
//!
//! Protein is set per kilogram of body weight, fat is a fixed quarter of the
//! calorie target and carbohydrates take what is left.

use crate::numeric::{at_least, round_half_up};
use crate::profile::PrimaryGoal;
use serde::{Deserialize, Serialize};

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
/// Share of the calorie target given to fat
pub const FAT_SHARE: f64 = 0.25;
/// Minimum carbohydrate calories under [`CarbPolicy::CalorieFloor`] (~100 g)
pub const CARB_FLOOR_KCAL: f64 = 400.0;

/// How the carbohydrate remainder is bounded when calories run short
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CarbPolicy {
    /// Raise the remainder to at least 400 kcal before computing grams
    #[default]
    CalorieFloor,
    /// No calorie floor; only keep the gram count from going negative
    ClampGrams,
}

impl CarbPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarbPolicy::CalorieFloor => "calorie-floor",
            CarbPolicy::ClampGrams => "clamp-grams",
        }
    }
}

impl std::str::FromStr for CarbPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "calorie-floor" => Ok(CarbPolicy::CalorieFloor),
            "clamp-grams" => Ok(CarbPolicy::ClampGrams),
            other => Err(format!("unknown carb policy: {}", other)),
        }
    }
}

/// Daily macro prescription, rounded but still `f64` so NaN can pass through
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fats_grams: f64,
    pub protein_calories: f64,
    pub carbs_calories: f64,
    pub fats_calories: f64,
    pub protein_percentage: f64,
    pub carbs_percentage: f64,
    pub fats_percentage: f64,
}

impl MacroSplit {
    /// Sum of the three macro calorie values
    pub fn total_calories(&self) -> f64 {
        self.protein_calories + self.carbs_calories + self.fats_calories
    }
}

/// Protein grams per kilogram of body weight for a goal
pub fn protein_per_kg(goal: PrimaryGoal) -> f64 {
    match goal {
        PrimaryGoal::WeightLoss => 2.0,
        PrimaryGoal::MuscleGain => 2.2,
        PrimaryGoal::Maintenance | PrimaryGoal::Unrecognized => 1.6,
    }
}

/// Split a calorie target into protein, carbohydrate and fat
pub fn split_macros(
    target_calories: f64,
    weight_kg: f64,
    goal: PrimaryGoal,
    carb_policy: CarbPolicy,
) -> MacroSplit {
    let protein_grams = round_half_up(weight_kg * protein_per_kg(goal));
    let protein_calories = protein_grams * KCAL_PER_GRAM_PROTEIN;

    let fats_calories = round_half_up(target_calories * FAT_SHARE);
    let fats_grams = round_half_up(fats_calories / KCAL_PER_GRAM_FAT);

    let remainder = target_calories - protein_calories - fats_calories;
    let remainder = match carb_policy {
        CarbPolicy::CalorieFloor => at_least(remainder, CARB_FLOOR_KCAL),
        CarbPolicy::ClampGrams => remainder,
    };
    let carbs_grams = at_least(round_half_up(remainder / KCAL_PER_GRAM_CARBS), 0.0);
    let carbs_calories = carbs_grams * KCAL_PER_GRAM_CARBS;

    let (protein_percentage, carbs_percentage, fats_percentage) =
        macro_percentages(protein_calories, carbs_calories, fats_calories);

    MacroSplit {
        protein_grams,
        carbs_grams,
        fats_grams,
        protein_calories,
        carbs_calories,
        fats_calories,
        protein_percentage,
        carbs_percentage,
        fats_percentage,
    }
}

/// Share of each macro in the summed macro calories, as rounded percentages.
///
/// The denominator is the sum of the three values, not the calorie target.
/// When that sum is not positive (including NaN) every share is 0.
pub fn macro_percentages(protein: f64, carbs: f64, fats: f64) -> (f64, f64, f64) {
    let total = protein + carbs + fats;
    if !(total > 0.0) {
        return (0.0, 0.0, 0.0);
    }

    let share = |calories: f64| round_half_up(calories / total * 100.0);
    (share(protein), share(carbs), share(fats))
}
