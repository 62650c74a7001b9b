//! Daily adherence to a nutrition plan
//!
//! Compares one day's intake with the plan's targets. The plan fields are the
//! denominators; nothing here is clamped at 100% so overshooting shows up.

use crate::plan::NutritionPlan;
use serde::{Deserialize, Serialize};

/// What was consumed over one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DailyIntake {
    pub calories: f64,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fats_grams: f64,
    pub water_ml: f64,
}

/// Progress towards a single target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetProgress {
    pub consumed: f64,
    pub target: f64,
    /// Percent of target, one decimal
    pub percent: f64,
    /// Left to reach the target, never negative
    pub remaining: f64,
}

impl TargetProgress {
    pub fn new(consumed: f64, target: f64) -> Self {
        Self {
            consumed,
            target,
            percent: completion_percent(consumed, target),
            remaining: (target - consumed).max(0.0),
        }
    }

    pub fn is_met(&self) -> bool {
        self.target > 0.0 && self.consumed >= self.target
    }
}

/// Progress on every plan target for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanAdherence {
    pub calories: TargetProgress,
    pub protein: TargetProgress,
    pub carbs: TargetProgress,
    pub fats: TargetProgress,
    pub water: TargetProgress,
}

impl PlanAdherence {
    /// How many of the five targets were reached
    pub fn targets_met(&self) -> usize {
        [self.calories, self.protein, self.carbs, self.fats, self.water]
            .iter()
            .filter(|progress| progress.is_met())
            .count()
    }
}

/// `consumed / target * 100` to one decimal; 0 when the target is not positive
pub fn completion_percent(consumed: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 0.0;
    }
    (consumed / target * 1000.0).round() / 10.0
}

pub fn plan_adherence(plan: &NutritionPlan, intake: &DailyIntake) -> PlanAdherence {
    PlanAdherence {
        calories: TargetProgress::new(intake.calories, f64::from(plan.target_calories)),
        protein: TargetProgress::new(intake.protein_grams, f64::from(plan.protein_grams)),
        carbs: TargetProgress::new(intake.carbs_grams, f64::from(plan.carbs_grams)),
        fats: TargetProgress::new(intake.fats_grams, f64::from(plan.fats_grams)),
        water: TargetProgress::new(intake.water_ml, f64::from(plan.water_target)),
    }
}
