//! Admin handlers. The router puts the whole group behind the admin guard.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::{RawTemplate, ValidatedJson};
use crate::api::AppState;
use crate::domain::{
    AdminStats, Business, Subscription, SubscriptionForm, SubscriptionPlan, SubscriptionRow,
    TemplateQueue, TemplateUploadResult,
};
use crate::errors::AppResult;
use crate::services::Viewer;
use crate::types::{Created, NoContent};

/// Template queue filter
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct QueueQuery {
    /// Include businesses whose template is not pending
    #[serde(default)]
    pub show_all: bool,
    /// Case-insensitive name or id fragment
    pub search: Option<String>,
}

/// Create admin routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/businesses", get(businesses))
        .route("/templates", get(template_queue))
        .route("/templates/:id", post(upload_processed_template))
        .route("/subscriptions/plans", get(plans))
        .route(
            "/subscriptions",
            get(list_subscriptions).post(create_subscription),
        )
        .route(
            "/subscriptions/:id",
            put(update_subscription).delete(delete_subscription),
        )
}

/// Dashboard counters and charts
#[utoipa::path(
    get,
    path = "/admin/stats",
    tag = "Admin",
    responses(
        (status = 200, description = "Dashboard statistics", body = AdminStats),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn stats(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> AppResult<Json<AdminStats>> {
    Ok(Json(state.admin_service.stats(&viewer).await?))
}

/// Every business with its owner
#[utoipa::path(
    get,
    path = "/admin/businesses",
    tag = "Admin",
    responses(
        (status = 200, description = "All businesses", body = Vec<Business>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn businesses(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> AppResult<Json<Vec<Business>>> {
    Ok(Json(state.admin_service.businesses(&viewer).await?))
}

/// Businesses awaiting template work
#[utoipa::path(
    get,
    path = "/admin/templates",
    tag = "Admin",
    params(QueueQuery),
    responses(
        (status = 200, description = "Template queue", body = TemplateQueue),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn template_queue(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<QueueQuery>,
) -> AppResult<Json<TemplateQueue>> {
    let queue = state
        .admin_service
        .template_queue(&viewer, query.show_all, query.search)
        .await?;
    Ok(Json(queue))
}

/// Store the processed PDF template of a business
#[utoipa::path(
    post,
    path = "/admin/templates/{id}",
    tag = "Admin",
    params(
        ("id" = i64, Path, description = "Business ID"),
        ("x-file-name" = Option<String>, Header, description = "Original file name")
    ),
    request_body(content = Vec<u8>, content_type = "application/pdf", description = "Processed template"),
    responses(
        (status = 200, description = "Template stored", body = TemplateUploadResult),
        (status = 400, description = "Not a PDF or empty"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_processed_template(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i64>,
    RawTemplate(upload): RawTemplate,
) -> AppResult<Json<TemplateUploadResult>> {
    let result = state
        .admin_service
        .upload_processed_template(&viewer, id, upload)
        .await?;
    Ok(Json(result))
}

/// Subscription plans
#[utoipa::path(
    get,
    path = "/admin/subscriptions/plans",
    tag = "Admin",
    responses(
        (status = 200, description = "Subscription plans", body = Vec<SubscriptionPlan>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn plans(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> AppResult<Json<Vec<SubscriptionPlan>>> {
    Ok(Json(state.admin_service.plans(&viewer).await?))
}

/// Subscriptions with business and plan names
#[utoipa::path(
    get,
    path = "/admin/subscriptions",
    tag = "Admin",
    responses(
        (status = 200, description = "Subscriptions", body = Vec<SubscriptionRow>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_subscriptions(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> AppResult<Json<Vec<SubscriptionRow>>> {
    Ok(Json(state.admin_service.subscriptions(&viewer).await?))
}

/// Create a subscription
#[utoipa::path(
    post,
    path = "/admin/subscriptions",
    tag = "Admin",
    request_body = SubscriptionForm,
    responses(
        (status = 201, description = "Subscription created", body = Subscription),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_subscription(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    ValidatedJson(form): ValidatedJson<SubscriptionForm>,
) -> AppResult<Created<Subscription>> {
    let created = state
        .admin_service
        .create_subscription(&viewer, form)
        .await?;
    Ok(Created(created))
}

/// Update a subscription
#[utoipa::path(
    put,
    path = "/admin/subscriptions/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "Subscription ID")),
    request_body = SubscriptionForm,
    responses(
        (status = 200, description = "Subscription updated", body = Subscription),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Subscription not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_subscription(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i64>,
    ValidatedJson(form): ValidatedJson<SubscriptionForm>,
) -> AppResult<Json<Subscription>> {
    let updated = state
        .admin_service
        .update_subscription(&viewer, id, form)
        .await?;
    Ok(Json(updated))
}

/// Delete a subscription
#[utoipa::path(
    delete,
    path = "/admin/subscriptions/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "Subscription ID")),
    responses(
        (status = 204, description = "Subscription deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Subscription not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_subscription(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i64>,
) -> AppResult<NoContent> {
    state
        .admin_service
        .delete_subscription(&viewer, id)
        .await?;
    Ok(NoContent)
}
