//! Input validation functions
//!
//! The calculator itself accepts anything and lets bad numbers surface as
//! NaN. These checks run first wherever a caller wants to reject a
//! questionnaire up front with a field-level message.

use crate::profile::{ActivityLevel, Gender, PrimaryGoal, Timeline, UserProfileInput};
use crate::units::{height_to_cm, parse_decimal, weight_to_kg};

/// Validate age in years
/// Valid range: 1-150
pub fn validate_age(age_years: f64) -> Result<(), String> {
    if age_years.is_nan() || age_years.is_infinite() {
        return Err("Age must be a valid number".to_string());
    }
    if age_years < 1.0 {
        return Err("Age must be at least 1 year".to_string());
    }
    if age_years > 150.0 {
        return Err("Age cannot exceed 150 years".to_string());
    }
    Ok(())
}

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm (covers infants to tallest recorded humans)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

// ============================================================================
// Profile Validation
// ============================================================================

/// Check every questionnaire answer, collecting one error per bad field
pub fn validate_profile_input(input: &UserProfileInput) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(msg) = validate_age(parse_decimal(&input.age)) {
        errors.push(ValidationError::new("age", &msg));
    }
    if let Err(msg) = validate_height_cm(height_to_cm(&input.height, input.height_unit)) {
        errors.push(ValidationError::new("height", &msg));
    }
    if let Err(msg) = validate_weight(weight_to_kg(&input.weight, input.weight_unit)) {
        errors.push(ValidationError::new("weight", &msg));
    }

    if input.primary_goal != PrimaryGoal::Maintenance {
        let target = input.target_weight.as_deref().unwrap_or_default();
        if let Err(msg) = validate_weight(weight_to_kg(target, input.weight_unit)) {
            errors.push(ValidationError::new("target_weight", &msg));
        }
    }

    if input.gender == Gender::Unrecognized {
        errors.push(ValidationError::new(
            "gender",
            "Must be one of: male, female, other, prefer-not-to-say",
        ));
    }
    if input.activity_level == ActivityLevel::Unrecognized {
        let levels: Vec<&str> = ActivityLevel::ALL.iter().map(|l| l.as_str()).collect();
        errors.push(ValidationError::new(
            "activity_level",
            &format!("Invalid activity level. Must be one of: {}", levels.join(", ")),
        ));
    }
    if input.primary_goal == PrimaryGoal::Unrecognized {
        errors.push(ValidationError::new(
            "primary_goal",
            "Must be one of: weight-loss, muscle-gain, maintenance",
        ));
    }
    if input.timeline == Timeline::Unrecognized {
        errors.push(ValidationError::new(
            "timeline",
            "Must be one of: aggressive, moderate, gradual",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "age" => "Age",
        "gender" => "Gender",
        "weight" => "Current Weight",
        "target_weight" => "Target Weight",
        "height" | "height_cm" => "Height",
        "weight_unit" => "Weight Unit",
        "height_unit" => "Height Unit",
        "activity_level" => "Activity Level",
        "primary_goal" => "Primary Goal",
        "timeline" => "Timeline",
        "calories" => "Calories",
        "protein_grams" => "Protein",
        "carbs_grams" => "Carbohydrates",
        "fats_grams" => "Fats",
        "water_ml" => "Water",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}
