//! Public pricing page data.

use axum::{extract::State, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::domain::SubscriptionPlan;
use crate::errors::AppResult;

pub fn pricing_routes() -> Router<AppState> {
    Router::new().route("/plans", get(pricing_plans))
}

/// Plans in pricing page order
#[utoipa::path(
    get,
    path = "/pricing/plans",
    tag = "Pricing",
    responses((status = 200, description = "Subscription plans", body = Vec<SubscriptionPlan>))
)]
pub async fn pricing_plans(State(state): State<AppState>) -> AppResult<Json<Vec<SubscriptionPlan>>> {
    Ok(Json(state.admin_service.pricing_plans().await?))
}
