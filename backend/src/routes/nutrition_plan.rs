//! Nutrition plan API routes

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::NutritionPlanService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use nutrition_coach_shared::{
    NutritionPlanResponse, PlanAdherenceRequest, PlanAdherenceResponse, UserProfileInput,
};
use validator::Validate;

/// Create nutrition plan routes
pub fn nutrition_plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_plan).post(save_plan).delete(delete_plan))
        .route("/preview", post(preview_plan))
        .route("/adherence", post(plan_adherence))
}

/// POST /api/v1/nutrition-plan/preview - Calculate a plan without storing it
async fn preview_plan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<UserProfileInput>,
) -> ApiResult<Json<NutritionPlanResponse>> {
    let calculator = state.calculator();
    let plan = NutritionPlanService::calculate(&calculator, &input)?;

    Ok(Json(NutritionPlanResponse::preview(plan, calculator.options())))
}

/// POST /api/v1/nutrition-plan - Calculate and store the user's plan
async fn save_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UserProfileInput>,
) -> ApiResult<Json<NutritionPlanResponse>> {
    let stored =
        NutritionPlanService::save_plan(state.db(), &state.calculator(), auth.user_id, &input)
            .await?;

    Ok(Json(stored.into()))
}

/// GET /api/v1/nutrition-plan - Get the user's current plan
async fn get_plan(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<NutritionPlanResponse>> {
    let stored = NutritionPlanService::get_plan(state.db(), auth.user_id).await?;

    Ok(Json(stored.into()))
}

/// DELETE /api/v1/nutrition-plan - Delete the user's current plan
async fn delete_plan(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<serde_json::Value>> {
    let deleted = NutritionPlanService::delete_plan(state.db(), auth.user_id).await?;

    if deleted {
        Ok(Json(serde_json::json!({"deleted": true})))
    } else {
        Err(ApiError::NotFound("No nutrition plan for this user".to_string()))
    }
}

/// POST /api/v1/nutrition-plan/adherence - Compare a day's intake with the plan
async fn plan_adherence(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<PlanAdherenceRequest>,
) -> ApiResult<Json<PlanAdherenceResponse>> {
    req.validate()?;

    let (stored, adherence) =
        NutritionPlanService::adherence(state.db(), auth.user_id, req.into()).await?;

    Ok(Json(PlanAdherenceResponse {
        plan_id: stored.id.to_string(),
        adherence,
    }))
}
