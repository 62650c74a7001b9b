//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod nutrition_plan;

pub use nutrition_plan::{NutritionPlanRecord, NutritionPlanRepository};
