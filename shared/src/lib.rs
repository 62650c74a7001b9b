//! Nutrition Coach Shared Library
//!
//! The nutrition plan calculator and the types shared by the backend and
//! WASM modules. Everything here is pure: no I/O, no logging, no globals.

pub mod adherence;
pub mod energy;
pub mod errors;
pub mod hydration;
pub mod macros;
pub mod numeric;
pub mod plan;
pub mod profile;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use adherence::{plan_adherence, DailyIntake, PlanAdherence, TargetProgress};
pub use energy::{calculate_bmr, calculate_tdee, CaloriePolicy};
pub use errors::*;
pub use hydration::WaterFormula;
pub use macros::{CarbPolicy, MacroSplit};
pub use plan::{
    calculate_nutrition_plan, CalculatorOptions, NutritionPlan, NutritionPlanCalculator,
    PlanFigures,
};
pub use profile::{ActivityLevel, BodyMetrics, Gender, PrimaryGoal, Timeline, UserProfileInput};
pub use types::*;

// Export units module items (canonical source for unit types)
pub use units::*;
