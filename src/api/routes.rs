//! Application route configuration.

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    admin_routes, amount_routes, auth_routes, business_routes, invoice_routes, pricing_routes,
    session_routes,
};
use super::middleware::{require_admin, require_session, viewer_middleware};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let viewer = middleware::from_fn_with_state(state.clone(), viewer_middleware);
    let cors = cors_layer(state.cors_allowed_origin.as_deref());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public routes
        .nest("/auth", auth_routes())
        .nest("/pricing", pricing_routes())
        // Viewer-aware routes that never reject
        .nest("/session", session_routes().route_layer(viewer.clone()))
        // Amount in words is public; the rest of /invoices needs a session
        .nest(
            "/invoices",
            amount_routes().merge(
                invoice_routes()
                    .route_layer(middleware::from_fn(require_session))
                    .route_layer(viewer.clone()),
            ),
        )
        .nest(
            "/businesses",
            business_routes()
                .route_layer(middleware::from_fn(require_session))
                .route_layer(viewer.clone()),
        )
        .nest(
            "/admin",
            admin_routes()
                .route_layer(middleware::from_fn(require_admin))
                .route_layer(viewer),
        )
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS for the configured front-end origin; same-origin only otherwise.
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin else {
        return CorsLayer::new();
    };

    match HeaderValue::from_str(origin) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            warn!("Ignoring invalid CORS_ALLOWED_ORIGIN {:?}", origin);
            CorsLayer::new()
        }
    }
}

/// Root endpoint
async fn root() -> &'static str {
    "Invoice portal"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceHealth {
    backend: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with invoice backend reachability
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let backend = match state.backend.ping().await {
        Ok(_) => ServiceStatus {
            status: "healthy",
            error: None,
        },
        Err(e) => ServiceStatus {
            status: "unhealthy",
            error: Some(e.to_string()),
        },
    };

    let healthy = backend.status == "healthy";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        services: ServiceHealth { backend },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
