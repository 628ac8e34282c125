//! HTTP handlers for REST API endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use ledecision::{
    planner, scorer, validate_plan_request, Catalog, PlanRequest, PlanResponse, RankRequest,
    Recommendation,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ServiceConfig;
use crate::error::{ApiError, ApiResult};
use crate::responses::HealthResponse;

/// State shared across all handlers
///
/// Both fields are immutable after startup, so handlers never lock.
#[derive(Clone)]
pub struct AppState {
    /// Reference data read by ranking and planning
    pub catalog: Arc<Catalog>,

    /// Immutable service configuration
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// Create a new AppState instance with catalog and configuration
    pub fn new(catalog: Catalog, config: ServiceConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }

    /// Create AppState from an already shared catalog
    pub fn new_from_arc(catalog: Arc<Catalog>, config: ServiceConfig) -> Self {
        Self {
            catalog,
            config: Arc::new(config),
        }
    }

    /// Random source for one plan request
    fn plan_rng(&self) -> StdRng {
        match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// POST /rank - Rank the candidate recommendations
pub async fn rank_recommendations(
    State(state): State<AppState>,
    payload: Result<Json<RankRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<Recommendation>>> {
    let Json(request) = payload?;
    let ranked = scorer::rank(&state.catalog, &request);
    debug!("Ranked {} recommendations", ranked.len());
    Ok(Json(ranked))
}

/// POST /plan_jit - Plan a JIT transfer
pub async fn plan_jit(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> ApiResult<Json<PlanResponse>> {
    let Json(request) = payload?;

    if state.config.strict_validation {
        if let Err(e) = validate_plan_request(&state.catalog, &request) {
            warn!(sku = %request.sku_id, "Rejected plan request: {}", e);
            return Err(ApiError::from(e));
        }
    }

    let mut rng = state.plan_rng();
    let plan = planner::plan_jit(&state.catalog, &request, Utc::now(), &mut rng)?;
    Ok(Json(plan))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy_at(Utc::now()))
}

/// Create router with all API endpoints
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/rank", post(rank_recommendations))
        .route("/plan_jit", post(plan_jit))
}
