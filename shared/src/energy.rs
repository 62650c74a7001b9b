//! Energy calculations: BMR, TDEE and the daily calorie target
//!
//! All functions are pure and keep full precision; rounding happens once the
//! target is derived.

use crate::numeric::{at_least, round_half_up};
use crate::profile::{ActivityLevel, BodyMetrics, Gender, PrimaryGoal, Timeline};
use serde::{Deserialize, Serialize};

/// Energy stored in one kilogram of body mass (kcal)
pub const KCAL_PER_KG: f64 = 7700.0;
/// Horizon over which the weight-delta policy spreads the change
pub const WEIGHT_DELTA_HORIZON_DAYS: f64 = 30.0;
/// Largest deficit the activity-deficit policy allows (kcal/day)
pub const MAX_DAILY_DEFICIT: f64 = 1000.0;
/// Largest deficit as a fraction of TDEE
pub const MAX_DEFICIT_FRACTION: f64 = 0.25;

// ============================================================================
// BMR and TDEE
// ============================================================================

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
///
/// `other` and `prefer-not-to-say` use the mean of both (-78); unrecognized
/// values use the female constant.
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: f64, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Unrecognized => base - 161.0,
        Gender::Other | Gender::PreferNotToSay => base - 78.0,
    }
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

// ============================================================================
// Target Calories
// ============================================================================

/// Strategy for turning TDEE into a daily calorie target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CaloriePolicy {
    /// Fixed deficit or surplus chosen by timeline; loss and gain targets are
    /// floored per gender, maintenance stays at TDEE
    #[default]
    ActivityDeficit,
    /// Reach the target weight in 30 days, no floors
    WeightDelta,
}

impl CaloriePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaloriePolicy::ActivityDeficit => "activity-deficit",
            CaloriePolicy::WeightDelta => "weight-delta",
        }
    }
}

impl std::str::FromStr for CaloriePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "activity-deficit" => Ok(CaloriePolicy::ActivityDeficit),
            "weight-delta" => Ok(CaloriePolicy::WeightDelta),
            other => Err(format!("unknown calorie policy: {}", other)),
        }
    }
}

/// Daily deficit for weight loss by timeline (kcal)
pub fn timeline_deficit(timeline: Timeline) -> f64 {
    match timeline {
        Timeline::Aggressive => 750.0,
        Timeline::Moderate | Timeline::Unrecognized => 500.0,
        Timeline::Gradual => 250.0,
    }
}

/// Daily surplus for muscle gain by timeline (kcal)
pub fn timeline_surplus(timeline: Timeline) -> f64 {
    match timeline {
        Timeline::Aggressive => 500.0,
        Timeline::Moderate | Timeline::Unrecognized => 300.0,
        Timeline::Gradual => 200.0,
    }
}

/// Lowest daily intake the activity-deficit policy will prescribe
pub fn minimum_calories(gender: Gender) -> f64 {
    match gender {
        Gender::Male => 1500.0,
        _ => 1200.0,
    }
}

/// Derive the rounded daily calorie target from TDEE
pub fn calculate_target_calories(policy: CaloriePolicy, tdee: f64, metrics: &BodyMetrics) -> f64 {
    let target = match policy {
        CaloriePolicy::ActivityDeficit => activity_deficit_target(tdee, metrics),
        CaloriePolicy::WeightDelta => weight_delta_target(tdee, metrics),
    };
    round_half_up(target)
}

fn activity_deficit_target(tdee: f64, metrics: &BodyMetrics) -> f64 {
    let target = match metrics.goal {
        PrimaryGoal::WeightLoss => {
            let max_deficit = MAX_DAILY_DEFICIT.min(tdee * MAX_DEFICIT_FRACTION);
            at_least(tdee - timeline_deficit(metrics.timeline), tdee - max_deficit)
        }
        PrimaryGoal::MuscleGain => tdee + timeline_surplus(metrics.timeline),
        // maintenance is always exactly TDEE
        PrimaryGoal::Maintenance | PrimaryGoal::Unrecognized => return tdee,
    };
    at_least(target, minimum_calories(metrics.gender))
}

fn weight_delta_target(tdee: f64, metrics: &BodyMetrics) -> f64 {
    if metrics.goal == PrimaryGoal::Maintenance {
        return tdee;
    }

    let weight_delta_kg = metrics.target_weight_kg - metrics.weight_kg;
    let daily_delta = weight_delta_kg * KCAL_PER_KG / WEIGHT_DELTA_HORIZON_DAYS;
    tdee + daily_delta
}
