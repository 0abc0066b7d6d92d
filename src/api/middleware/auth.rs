//! Viewer resolution and route guards.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::errors::AppError;
use crate::services::Viewer;

/// Raw `Authorization` header value, if readable.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok())
}

/// Resolve the viewer behind the request.
///
/// Never rejects: a missing or unusable token yields an anonymous viewer,
/// which is injected into the request extensions either way.
pub async fn viewer_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let viewer = state
        .session_service
        .identify(bearer_token(request.headers()))
        .await;
    request.extensions_mut().insert(viewer);

    next.run(request).await
}

/// Reject anonymous viewers with `401`.
pub async fn require_session(request: Request, next: Next) -> Result<Response, AppError> {
    viewer_of(&request).require_session()?;
    Ok(next.run(request).await)
}

/// Reject anonymous viewers with `401` and non-admins with `403`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    viewer_of(&request).require_admin()?;
    Ok(next.run(request).await)
}

fn viewer_of(request: &Request) -> Viewer {
    request
        .extensions()
        .get::<Viewer>()
        .cloned()
        .unwrap_or_default()
}
