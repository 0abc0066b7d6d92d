//! Authentication handlers.
//!
//! Forwarded to the invoice backend; the portal keeps no credentials.

use axum::{extract::State, response::Json, routing::post, Router};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Credentials, ForgotPasswordForm, ResetPasswordForm, SignupForm};
use crate::errors::AppResult;
use crate::services::LoginOutcome;
use crate::types::{Created, MessageResponse};

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/signup", post(signup))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
}

/// Login and resolve the landing page
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = Credentials,
    responses(
        (status = 200, description = "Login successful", body = LoginOutcome),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Password reset required (PASSWORD_RESET_REQUIRED)")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<Credentials>,
) -> AppResult<Json<LoginOutcome>> {
    let outcome = state.session_service.login(&credentials).await?;
    Ok(Json(outcome))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Authentication",
    request_body = SignupForm,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Validation error or address already registered")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(form): ValidatedJson<SignupForm>,
) -> AppResult<Created<MessageResponse>> {
    state.session_service.signup(&form).await?;
    Ok(Created(MessageResponse::new(
        "Account created. Please sign in.",
    )))
}

/// Request a password reset email
#[utoipa::path(
    post,
    path = "/auth/forgot-password",
    tag = "Authentication",
    request_body = ForgotPasswordForm,
    responses(
        (status = 200, description = "Reset instructions sent", body = MessageResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(form): ValidatedJson<ForgotPasswordForm>,
) -> AppResult<Json<MessageResponse>> {
    state.session_service.forgot_password(&form).await?;
    Ok(Json(MessageResponse::new(
        "If the address is registered, a new password has been sent.",
    )))
}

/// Replace the current password
#[utoipa::path(
    post,
    path = "/auth/reset-password",
    tag = "Authentication",
    request_body = ResetPasswordForm,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Current password rejected")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(form): ValidatedJson<ResetPasswordForm>,
) -> AppResult<Json<MessageResponse>> {
    state.session_service.reset_password(&form).await?;
    Ok(Json(MessageResponse::new(
        "Password updated. Please sign in with the new password.",
    )))
}
