//! Onboarding profile types
//!
//! The questionnaire hands the calculator a [`UserProfileInput`]: every
//! number as a string and every choice as a tag. Tags that are not
//! recognized never fail; they become an `Unrecognized` variant that each
//! calculator stage resolves to its documented default.

use crate::units::{height_to_cm, parse_decimal, weight_to_kg, HeightUnit, WeightUnit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowercase, trim and treat `_` like `-` so `Lightly_Active` reads as `lightly-active`
fn normalize_tag(value: &str) -> String {
    value.trim().to_lowercase().replace('_', "-")
}

// ============================================================================
// Gender
// ============================================================================

/// Gender as answered in the questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
    Unrecognized,
}

impl Gender {
    pub fn from_form_value(value: &str) -> Self {
        match normalize_tag(value).as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            "other" => Gender::Other,
            "prefer-not-to-say" => Gender::PreferNotToSay,
            _ => Gender::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::PreferNotToSay => "prefer-not-to-say",
            Gender::Unrecognized => "unrecognized",
        }
    }
}

// ============================================================================
// Activity Level
// ============================================================================

/// Activity level for TDEE and hydration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise or a physical job
    ExtremelyActive,
    Unrecognized,
}

impl ActivityLevel {
    /// Levels in increasing order of activity
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    pub fn from_form_value(value: &str) -> Self {
        match normalize_tag(value).as_str() {
            "sedentary" => ActivityLevel::Sedentary,
            "lightly-active" => ActivityLevel::LightlyActive,
            "moderately-active" => ActivityLevel::ModeratelyActive,
            "very-active" => ActivityLevel::VeryActive,
            "extremely-active" => ActivityLevel::ExtremelyActive,
            _ => ActivityLevel::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly-active",
            ActivityLevel::ModeratelyActive => "moderately-active",
            ActivityLevel::VeryActive => "very-active",
            ActivityLevel::ExtremelyActive => "extremely-active",
            ActivityLevel::Unrecognized => "unrecognized",
        }
    }

    /// Get the activity multiplier for TDEE calculation
    ///
    /// Unrecognized levels are treated as moderately active.
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
            ActivityLevel::Unrecognized => 1.55,
        }
    }
}

// ============================================================================
// Goal and Timeline
// ============================================================================

/// Primary goal chosen during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum PrimaryGoal {
    WeightLoss,
    MuscleGain,
    Maintenance,
    Unrecognized,
}

impl PrimaryGoal {
    pub fn from_form_value(value: &str) -> Self {
        match normalize_tag(value).as_str() {
            "weight-loss" => PrimaryGoal::WeightLoss,
            "muscle-gain" => PrimaryGoal::MuscleGain,
            "maintenance" => PrimaryGoal::Maintenance,
            _ => PrimaryGoal::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryGoal::WeightLoss => "weight-loss",
            PrimaryGoal::MuscleGain => "muscle-gain",
            PrimaryGoal::Maintenance => "maintenance",
            PrimaryGoal::Unrecognized => "unrecognized",
        }
    }
}

/// How hard the user wants to push toward the goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "&'static str")]
pub enum Timeline {
    Aggressive,
    #[default]
    Moderate,
    Gradual,
    Unrecognized,
}

impl Timeline {
    pub fn from_form_value(value: &str) -> Self {
        match normalize_tag(value).as_str() {
            "aggressive" => Timeline::Aggressive,
            "moderate" => Timeline::Moderate,
            "gradual" => Timeline::Gradual,
            _ => Timeline::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeline::Aggressive => "aggressive",
            Timeline::Moderate => "moderate",
            Timeline::Gradual => "gradual",
            Timeline::Unrecognized => "unrecognized",
        }
    }
}

macro_rules! tag_conversions {
    ($($tag:ty),* $(,)?) => {
        $(
            impl From<String> for $tag {
                fn from(value: String) -> Self {
                    Self::from_form_value(&value)
                }
            }

            impl From<$tag> for &'static str {
                fn from(tag: $tag) -> Self {
                    tag.as_str()
                }
            }

            impl fmt::Display for $tag {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

tag_conversions!(Gender, ActivityLevel, PrimaryGoal, Timeline);

// ============================================================================
// Profile Input
// ============================================================================

/// Questionnaire answers, exactly as captured by the onboarding form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfileInput {
    /// Age in years
    pub age: String,
    pub gender: Gender,
    pub height: String,
    pub height_unit: HeightUnit,
    pub weight: String,
    pub weight_unit: WeightUnit,
    /// Goal weight in `weight_unit`; may be empty for maintenance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<String>,
    pub activity_level: ActivityLevel,
    pub primary_goal: PrimaryGoal,
    #[serde(default)]
    pub timeline: Timeline,
}

impl UserProfileInput {
    /// Normalize the answers into SI measurements.
    ///
    /// Strings that do not hold a number become NaN; nothing here fails.
    pub fn body_metrics(&self) -> BodyMetrics {
        BodyMetrics {
            age_years: parse_decimal(&self.age),
            height_cm: height_to_cm(&self.height, self.height_unit),
            weight_kg: weight_to_kg(&self.weight, self.weight_unit),
            target_weight_kg: weight_to_kg(
                self.target_weight.as_deref().unwrap_or_default(),
                self.weight_unit,
            ),
            gender: self.gender,
            activity_level: self.activity_level,
            goal: self.primary_goal,
            timeline: self.timeline,
        }
    }
}

/// Profile data after unit normalization, consumed by every later stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMetrics {
    pub age_years: f64,
    pub height_cm: f64,
    pub weight_kg: f64,
    /// NaN when no target weight was given
    pub target_weight_kg: f64,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub goal: PrimaryGoal,
    pub timeline: Timeline,
}
