//! Nutrition plan service
//!
//! Provides business logic for nutrition plans:
//! - Questionnaire validation ahead of the calculator
//! - Plan calculation with the configured policies
//! - Storing, fetching and deleting a user's current plan
//! - Daily adherence against the stored plan

use crate::error::{ApiError, ApiResult};
use crate::repositories::{NutritionPlanRecord, NutritionPlanRepository};
use chrono::{DateTime, Utc};
use nutrition_coach_shared::validation::validate_profile_input;
use nutrition_coach_shared::{
    plan_adherence, CalculatorOptions, DailyIntake, NutritionPlan, NutritionPlanCalculator,
    NutritionPlanResponse, PlanAdherence, UserProfileInput,
};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

/// A plan as stored for a user
#[derive(Debug, Clone)]
pub struct StoredNutritionPlan {
    pub id: Uuid,
    pub plan: NutritionPlan,
    pub options: CalculatorOptions,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NutritionPlanRecord> for StoredNutritionPlan {
    type Error = ApiError;

    fn try_from(record: NutritionPlanRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            plan: record.plan(),
            options: record.options()?,
            created_at: record.created_at,
        })
    }
}

impl From<StoredNutritionPlan> for NutritionPlanResponse {
    fn from(stored: StoredNutritionPlan) -> Self {
        NutritionPlanResponse {
            id: Some(stored.id.to_string()),
            plan: stored.plan,
            calorie_policy: stored.options.calorie_policy,
            carb_policy: stored.options.carb_policy,
            water_formula: stored.options.water_formula,
            created_at: Some(stored.created_at),
        }
    }
}

/// Nutrition plan service for business logic
pub struct NutritionPlanService;

impl NutritionPlanService {
    /// Validate the questionnaire and calculate a plan without storing it
    pub fn calculate(
        calculator: &NutritionPlanCalculator,
        input: &UserProfileInput,
    ) -> ApiResult<NutritionPlan> {
        validate_profile_input(input)?;

        let plan = calculator.calculate(input)?;

        debug!(
            bmr = plan.bmr,
            tdee = plan.tdee,
            target_calories = plan.target_calories,
            goal = %input.primary_goal,
            "Nutrition plan calculated"
        );

        Ok(plan)
    }

    /// Calculate a plan and make it the user's current plan
    pub async fn save_plan(
        pool: &PgPool,
        calculator: &NutritionPlanCalculator,
        user_id: Uuid,
        input: &UserProfileInput,
    ) -> ApiResult<StoredNutritionPlan> {
        let plan = Self::calculate(calculator, input)?;
        let options = calculator.options();

        let record = NutritionPlanRepository::replace_for_user(pool, user_id, &plan, options)
            .await?;

        info!(
            %user_id,
            plan_id = %record.id,
            target_calories = plan.target_calories,
            calorie_policy = options.calorie_policy.as_str(),
            carb_policy = options.carb_policy.as_str(),
            water_formula = options.water_formula.as_str(),
            "Nutrition plan stored"
        );

        record.try_into()
    }

    /// Get the user's current plan
    pub async fn get_plan(pool: &PgPool, user_id: Uuid) -> ApiResult<StoredNutritionPlan> {
        NutritionPlanRepository::find_by_user(pool, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("No nutrition plan for this user".to_string()))?
            .try_into()
    }

    /// Delete the user's current plan
    pub async fn delete_plan(pool: &PgPool, user_id: Uuid) -> ApiResult<bool> {
        let deleted = NutritionPlanRepository::delete_for_user(pool, user_id)
            .await?;

        if deleted {
            info!(%user_id, "Nutrition plan deleted");
        }
        Ok(deleted)
    }

    /// Compare one day's intake with the user's current plan
    pub async fn adherence(
        pool: &PgPool,
        user_id: Uuid,
        intake: DailyIntake,
    ) -> ApiResult<(StoredNutritionPlan, PlanAdherence)> {
        let stored = Self::get_plan(pool, user_id).await?;
        let adherence = plan_adherence(&stored.plan, &intake);

        debug!(
            %user_id,
            calories_percent = adherence.calories.percent,
            water_percent = adherence.water.percent,
            targets_met = adherence.targets_met(),
            "Adherence calculated"
        );

        Ok((stored, adherence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutrition_coach_shared::{
        ActivityLevel, CaloriePolicy, Gender, HeightUnit, PrimaryGoal, Timeline, WeightUnit,
    };

    fn input() -> UserProfileInput {
        UserProfileInput {
            age: "30".to_string(),
            gender: Gender::Male,
            height: "5'10".to_string(),
            height_unit: HeightUnit::Ft,
            weight: "180".to_string(),
            weight_unit: WeightUnit::Lbs,
            target_weight: Some("165".to_string()),
            activity_level: ActivityLevel::ModeratelyActive,
            primary_goal: PrimaryGoal::WeightLoss,
            timeline: Timeline::Moderate,
        }
    }

    #[test]
    fn test_calculate_uses_configured_policy() {
        let default_plan =
            NutritionPlanService::calculate(&NutritionPlanCalculator::default(), &input()).unwrap();
        assert_eq!(default_plan.target_calories, 2263);

        let weight_delta = NutritionPlanCalculator::new(CalculatorOptions {
            calorie_policy: CaloriePolicy::WeightDelta,
            ..Default::default()
        });
        let plan = NutritionPlanService::calculate(&weight_delta, &input()).unwrap();
        assert_eq!(plan.target_calories, 1017);
    }

    #[test]
    fn test_calculate_rejects_invalid_questionnaire() {
        let mut bad = input();
        bad.age = String::new();

        let err = NutritionPlanService::calculate(&NutritionPlanCalculator::default(), &bad)
            .unwrap_err();
        match err {
            ApiError::InvalidFields(errors) => assert_eq!(errors[0].field, "age"),
            other => panic!("expected InvalidFields, got {:?}", other),
        }
    }

    #[test]
    fn test_stored_plan_response() {
        let plan =
            NutritionPlanService::calculate(&NutritionPlanCalculator::default(), &input()).unwrap();
        let stored = StoredNutritionPlan {
            id: Uuid::new_v4(),
            plan,
            options: CalculatorOptions::default(),
            created_at: Utc::now(),
        };
        let id = stored.id.to_string();

        let response = NutritionPlanResponse::from(stored);
        assert_eq!(response.id, Some(id));
        assert_eq!(response.plan.water_target, 3766);
        assert!(response.created_at.is_some());
    }
}
