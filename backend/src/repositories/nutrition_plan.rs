//! Nutrition plan repository for database operations

use chrono::{DateTime, Utc};
use nutrition_coach_shared::{CalculatorOptions, NutritionPlan};
use sqlx::{PgPool, Result};
use uuid::Uuid;

/// Nutrition plan record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NutritionPlanRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bmr: i32,
    pub tdee: i32,
    pub target_calories: i32,
    pub protein_grams: i32,
    pub carbs_grams: i32,
    pub fats_grams: i32,
    pub protein_calories: i32,
    pub carbs_calories: i32,
    pub fats_calories: i32,
    pub protein_percentage: i32,
    pub carbs_percentage: i32,
    pub fats_percentage: i32,
    pub water_target: i32,
    pub calorie_policy: String,
    pub carb_policy: String,
    pub water_formula: String,
    pub created_at: DateTime<Utc>,
}

impl NutritionPlanRecord {
    pub fn plan(&self) -> NutritionPlan {
        NutritionPlan {
            bmr: self.bmr,
            tdee: self.tdee,
            target_calories: self.target_calories,
            protein_grams: self.protein_grams,
            carbs_grams: self.carbs_grams,
            fats_grams: self.fats_grams,
            protein_calories: self.protein_calories,
            carbs_calories: self.carbs_calories,
            fats_calories: self.fats_calories,
            protein_percentage: self.protein_percentage,
            carbs_percentage: self.carbs_percentage,
            fats_percentage: self.fats_percentage,
            water_target: self.water_target,
        }
    }

    /// Policies the plan was calculated with
    pub fn options(&self) -> anyhow::Result<CalculatorOptions> {
        Ok(CalculatorOptions {
            calorie_policy: self.calorie_policy.parse().map_err(anyhow::Error::msg)?,
            carb_policy: self.carb_policy.parse().map_err(anyhow::Error::msg)?,
            water_formula: self.water_formula.parse().map_err(anyhow::Error::msg)?,
        })
    }
}

const PLAN_COLUMNS: &str = "id, user_id, bmr, tdee, target_calories, \
    protein_grams, carbs_grams, fats_grams, \
    protein_calories, carbs_calories, fats_calories, \
    protein_percentage, carbs_percentage, fats_percentage, \
    water_target, calorie_policy, carb_policy, water_formula, created_at";

/// Nutrition plan repository
pub struct NutritionPlanRepository;

impl NutritionPlanRepository {
    /// Store a new plan for a user, replacing any previous one
    ///
    /// The replacement row gets a fresh id and timestamp. Concurrent saves for
    /// one user resolve on the `user_id` constraint; the last writer wins.
    pub async fn replace_for_user(
        pool: &PgPool,
        user_id: Uuid,
        plan: &NutritionPlan,
        options: CalculatorOptions,
    ) -> Result<NutritionPlanRecord> {
        sqlx::query_as::<_, NutritionPlanRecord>(&format!(
            r#"
            INSERT INTO nutrition_plans (
                user_id, bmr, tdee, target_calories,
                protein_grams, carbs_grams, fats_grams,
                protein_calories, carbs_calories, fats_calories,
                protein_percentage, carbs_percentage, fats_percentage,
                water_target, calorie_policy, carb_policy, water_formula
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ON CONFLICT (user_id) DO UPDATE SET
                id = gen_random_uuid(),
                bmr = EXCLUDED.bmr,
                tdee = EXCLUDED.tdee,
                target_calories = EXCLUDED.target_calories,
                protein_grams = EXCLUDED.protein_grams,
                carbs_grams = EXCLUDED.carbs_grams,
                fats_grams = EXCLUDED.fats_grams,
                protein_calories = EXCLUDED.protein_calories,
                carbs_calories = EXCLUDED.carbs_calories,
                fats_calories = EXCLUDED.fats_calories,
                protein_percentage = EXCLUDED.protein_percentage,
                carbs_percentage = EXCLUDED.carbs_percentage,
                fats_percentage = EXCLUDED.fats_percentage,
                water_target = EXCLUDED.water_target,
                calorie_policy = EXCLUDED.calorie_policy,
                carb_policy = EXCLUDED.carb_policy,
                water_formula = EXCLUDED.water_formula,
                created_at = NOW()
            RETURNING {PLAN_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(plan.bmr)
        .bind(plan.tdee)
        .bind(plan.target_calories)
        .bind(plan.protein_grams)
        .bind(plan.carbs_grams)
        .bind(plan.fats_grams)
        .bind(plan.protein_calories)
        .bind(plan.carbs_calories)
        .bind(plan.fats_calories)
        .bind(plan.protein_percentage)
        .bind(plan.carbs_percentage)
        .bind(plan.fats_percentage)
        .bind(plan.water_target)
        .bind(options.calorie_policy.as_str())
        .bind(options.carb_policy.as_str())
        .bind(options.water_formula.as_str())
        .fetch_one(pool)
        .await
    }

    /// Find the current plan for a user
    pub async fn find_by_user(pool: &PgPool, user_id: Uuid) -> Result<Option<NutritionPlanRecord>> {
        let record = sqlx::query_as::<_, NutritionPlanRecord>(&format!(
            "SELECT {PLAN_COLUMNS} FROM nutrition_plans WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Delete the plan for a user, returning whether one existed
    pub async fn delete_for_user(pool: &PgPool, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM nutrition_plans WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
