//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the calculator.

pub mod nutrition_plan;

pub use nutrition_plan::{NutritionPlanService, StoredNutritionPlan};
