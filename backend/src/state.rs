//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::auth::JwtService;
use crate::config::AppConfig;
use nutrition_coach_shared::NutritionPlanCalculator;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
///
/// - `db`: PgPool is internally Arc'd, cloning is O(1)
/// - `config`: Wrapped in Arc, cloning is O(1)
/// - `jwt`: Pre-computed keys wrapped in Arc, cloning is O(1)
/// - `calculator`: Copy, configured once from `config.calculator`
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    /// Nutrition plan calculator with the configured policies
    pub calculator: NutritionPlanCalculator,
}

impl AppState {
    /// Create a new application state
    ///
    /// Pre-computes JWT keys from the config secret, so call once at startup.
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry_secs);
        let calculator = NutritionPlanCalculator::new(config.calculator);

        Self {
            db,
            config: Arc::new(config),
            jwt,
            calculator,
        }
    }

    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn calculator(&self) -> NutritionPlanCalculator {
        self.calculator
    }
}
