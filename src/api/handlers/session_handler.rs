//! Session handlers: who is viewing, where they land, what they may open.
//!
//! None of these fail for identity problems; an unusable token is reported
//! as the anonymous role.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::AppState;
use crate::domain::{Access, Requirement, Role, RouteTable, UserSession};
use crate::services::{Landing, Viewer};

/// Current viewer
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionView {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSession>,
    /// Avatar initials of the signed-in user
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "JD")]
    pub initials: Option<String>,
}

/// Front-end path to check
#[derive(Debug, Deserialize, IntoParams)]
pub struct AccessQuery {
    /// Front-end path, e.g. `/admin/dashboard`
    #[serde(default)]
    pub path: String,
}

/// Route guard decision
#[derive(Debug, Serialize, ToSchema)]
pub struct AccessView {
    pub role: Role,
    pub path: String,
    /// Requirement of the matched route; absent for unknown paths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<Requirement>,
    pub access: Access,
}

/// Create session routes
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(current))
        .route("/landing", get(landing))
        .route("/access", get(access))
}

/// Describe the current viewer
#[utoipa::path(
    get,
    path = "/session",
    tag = "Session",
    responses((status = 200, description = "Current viewer", body = SessionView)),
    security((), ("bearer_auth" = []))
)]
pub async fn current(Extension(viewer): Extension<Viewer>) -> Json<SessionView> {
    Json(SessionView {
        role: viewer.role(),
        initials: viewer.user().map(UserSession::initials),
        user: viewer.user().cloned(),
    })
}

/// Resolve the post-login destination
#[utoipa::path(
    get,
    path = "/session/landing",
    tag = "Session",
    responses((status = 200, description = "Landing page", body = Landing)),
    security((), ("bearer_auth" = []))
)]
pub async fn landing(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> Json<Landing> {
    Json(state.session_service.landing(&viewer).await)
}

/// Check whether the viewer may open a front-end page
#[utoipa::path(
    get,
    path = "/session/access",
    tag = "Session",
    params(AccessQuery),
    responses((status = 200, description = "Guard decision", body = AccessView)),
    security((), ("bearer_auth" = []))
)]
pub async fn access(
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<AccessQuery>,
) -> Json<AccessView> {
    let role = viewer.role();
    Json(AccessView {
        role,
        requirement: RouteTable::requirement(&query.path),
        access: RouteTable::check(&query.path, role),
        path: query.path,
    })
}
