//! Nutrition Coach WASM Module
//!
//! Runs the nutrition plan calculator in the browser so the onboarding form
//! can show a plan before anything is submitted. Values cross the boundary
//! as JSON strings.

use nutrition_coach_shared::validation::validate_profile_input;
use nutrition_coach_shared::{
    ActivityLevel, CalculatorOptions, Gender, NutritionPlanCalculator, UserProfileInput,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct FieldError<'a> {
    field: &'a str,
    label: &'a str,
    message: &'a str,
}

fn plan_json(input_json: &str, options_json: Option<&str>) -> Result<String, String> {
    let input: UserProfileInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid profile: {}", e))?;
    let options: CalculatorOptions = match options_json {
        Some(json) => serde_json::from_str(json).map_err(|e| format!("Invalid options: {}", e))?,
        None => CalculatorOptions::default(),
    };

    let plan = NutritionPlanCalculator::new(options)
        .calculate(&input)
        .map_err(|e| e.to_string())?;

    serde_json::to_string(&plan).map_err(|e| e.to_string())
}

fn validation_json(input_json: &str) -> Result<String, String> {
    let input: UserProfileInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid profile: {}", e))?;

    let errors = validate_profile_input(&input).err().unwrap_or_default();
    let fields: Vec<FieldError> = errors
        .iter()
        .map(|e| FieldError {
            field: &e.field,
            label: &e.display_label,
            message: &e.message,
        })
        .collect();

    serde_json::to_string(&fields).map_err(|e| e.to_string())
}

/// Calculate a nutrition plan from questionnaire JSON with the default policies
#[wasm_bindgen]
pub fn calculate_nutrition_plan(input_json: &str) -> Result<String, JsValue> {
    plan_json(input_json, None).map_err(|e| JsValue::from_str(&e))
}

/// Calculate a nutrition plan with explicit policies, e.g.
/// `{"calorie_policy": "weight-delta"}`
#[wasm_bindgen]
pub fn calculate_nutrition_plan_with(input_json: &str, options_json: &str) -> Result<String, JsValue> {
    plan_json(input_json, Some(options_json)).map_err(|e| JsValue::from_str(&e))
}

/// Field errors for a questionnaire as a JSON array; `[]` when it is valid
#[wasm_bindgen]
pub fn validate_profile(input_json: &str) -> Result<String, JsValue> {
    validation_json(input_json).map_err(|e| JsValue::from_str(&e))
}

/// Calculate BMR (Mifflin-St Jeor), unrounded
#[wasm_bindgen]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: f64, gender: &str) -> f64 {
    nutrition_coach_shared::calculate_bmr(
        weight_kg,
        height_cm,
        age_years,
        Gender::from_form_value(gender),
    )
}

/// Calculate TDEE from BMR and an activity level tag, unrounded
#[wasm_bindgen]
pub fn calculate_tdee(bmr: f64, activity_level: &str) -> f64 {
    nutrition_coach_shared::calculate_tdee(bmr, ActivityLevel::from_form_value(activity_level))
}
