//! Error types for the nutrition plan calculator

use thiserror::Error;

/// Raised at the boundary where calculated figures become a [`crate::NutritionPlan`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The total pipeline produced NaN or infinite values, usually from an
    /// unparseable number in the questionnaire
    #[error("Nutrition plan has non-finite fields: {}", .fields.join(", "))]
    NonFinite { fields: Vec<&'static str> },

    /// Finite figures too large to store as whole kcal, grams or millilitres
    #[error("Nutrition plan has out-of-range fields: {}", .fields.join(", "))]
    OutOfRange { fields: Vec<&'static str> },
}

impl PlanError {
    /// Names of the offending plan fields
    pub fn fields(&self) -> &[&'static str] {
        match self {
            PlanError::NonFinite { fields } | PlanError::OutOfRange { fields } => fields,
        }
    }
}
