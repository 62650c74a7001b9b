//! API request and response types

use crate::adherence::{DailyIntake, PlanAdherence};
use crate::energy::CaloriePolicy;
use crate::hydration::WaterFormula;
use crate::macros::CarbPolicy;
use crate::plan::{CalculatorOptions, NutritionPlan};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

// ============================================================================
// Nutrition Plan Types
// ============================================================================

/// A calculated plan together with the options that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionPlanResponse {
    /// Absent for previews that were not stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub plan: NutritionPlan,
    pub calorie_policy: CaloriePolicy,
    pub carb_policy: CarbPolicy,
    pub water_formula: WaterFormula,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl NutritionPlanResponse {
    /// Response for a plan that was calculated but not stored
    pub fn preview(plan: NutritionPlan, options: CalculatorOptions) -> Self {
        Self {
            id: None,
            plan,
            calorie_policy: options.calorie_policy,
            carb_policy: options.carb_policy,
            water_formula: options.water_formula,
            created_at: None,
        }
    }
}

/// One day's intake, checked before comparing with the stored plan
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlanAdherenceRequest {
    #[validate(range(min = 0.0, message = "Calories cannot be negative"))]
    #[serde(default)]
    pub calories: f64,
    #[validate(range(min = 0.0, message = "Protein cannot be negative"))]
    #[serde(default)]
    pub protein_grams: f64,
    #[validate(range(min = 0.0, message = "Carbohydrates cannot be negative"))]
    #[serde(default)]
    pub carbs_grams: f64,
    #[validate(range(min = 0.0, message = "Fats cannot be negative"))]
    #[serde(default)]
    pub fats_grams: f64,
    #[validate(range(min = 0.0, message = "Water cannot be negative"))]
    #[serde(default)]
    pub water_ml: f64,
}

impl From<PlanAdherenceRequest> for DailyIntake {
    fn from(req: PlanAdherenceRequest) -> Self {
        DailyIntake {
            calories: req.calories,
            protein_grams: req.protein_grams,
            carbs_grams: req.carbs_grams,
            fats_grams: req.fats_grams,
            water_ml: req.water_ml,
        }
    }
}

/// Adherence of one day against the stored plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanAdherenceResponse {
    pub plan_id: String,
    #[serde(flatten)]
    pub adherence: PlanAdherence,
}
