//! Session service - Identity, landing page and account flows.
//!
//! The pure decisions live in `domain::session` and `domain::navigation`;
//! this service fetches what they need from the backend and degrades
//! instead of failing when the backend misbehaves.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use crate::config::{DEFAULT_PASSWORD_DETAIL, LOGIN_FAILED_MESSAGE};
use crate::domain::{
    classify, post_login_destination, BusinessMembership, Credentials, Destination,
    ForgotPasswordForm, ResetPasswordForm, Role, SignupForm, UserSession,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{token, BackendClient};

/// The party behind a request: an optional bearer token and the user it
/// resolved to.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    token: Option<String>,
    user: Option<UserSession>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(token: impl Into<String>, user: UserSession) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    pub fn role(&self) -> Role {
        classify(self.user.as_ref())
    }

    pub fn user(&self) -> Option<&UserSession> {
        self.user.as_ref()
    }

    /// Token and user of a signed-in viewer, `Unauthorized` otherwise.
    pub fn require_session(&self) -> AppResult<(&str, &UserSession)> {
        match (self.token.as_deref(), self.user.as_ref()) {
            (Some(token), Some(user)) => Ok((token, user)),
            _ => Err(AppError::Unauthorized),
        }
    }

    /// Token of an admin viewer; `Unauthorized` without a session,
    /// `Forbidden` for anyone else.
    pub fn require_admin(&self) -> AppResult<&str> {
        let (token, _) = self.require_session()?;
        if self.role().is_admin() {
            Ok(token)
        } else {
            Err(AppError::Forbidden)
        }
    }
}

/// Where a viewer lands after signing in
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Landing {
    pub role: Role,
    pub destination: Destination,
    /// Front-end path of `destination`
    #[schema(example = "/builder")]
    pub path: String,
    /// Set when a backend failure forced a fallback decision
    pub degraded: bool,
}

impl Landing {
    fn new(role: Role, destination: Destination, degraded: bool) -> Self {
        Self {
            role,
            path: destination.path(),
            destination,
            degraded,
        }
    }
}

/// Successful login: the backend token plus the landing it leads to
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginOutcome {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    pub landing: Landing,
}

/// Session service trait for dependency injection.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Resolve a raw bearer token to a viewer. Never fails: any problem
    /// yields an anonymous viewer.
    async fn identify(&self, token: Option<&str>) -> Viewer;

    /// Post-login destination for a viewer. Never fails.
    async fn landing(&self, viewer: &Viewer) -> Landing;

    /// Exchange credentials for a token and resolve its landing
    async fn login(&self, credentials: &Credentials) -> AppResult<LoginOutcome>;

    async fn signup(&self, form: &SignupForm) -> AppResult<()>;

    async fn forgot_password(&self, form: &ForgotPasswordForm) -> AppResult<()>;

    async fn reset_password(&self, form: &ResetPasswordForm) -> AppResult<()>;
}

/// Concrete implementation of SessionService backed by the invoice backend.
pub struct SessionManager {
    backend: Arc<dyn BackendClient>,
}

impl SessionManager {
    pub fn new(backend: Arc<dyn BackendClient>) -> Self {
        Self { backend }
    }

    /// Landing of a standard viewer, with the template-existence check on
    /// top of the stored template status.
    async fn standard_landing(&self, token: &str, user: &UserSession) -> (Destination, bool) {
        let businesses = match self.backend.user_businesses(token, user.user_id).await {
            Ok(businesses) => businesses,
            Err(e) => {
                warn!(user_id = user.user_id, error = %e, "Business listing failed, landing on builder");
                return (Destination::Builder, true);
            }
        };

        let memberships: Vec<BusinessMembership> =
            businesses.iter().map(BusinessMembership::from).collect();
        let decision = post_login_destination(Role::Standard, &memberships);

        let (Destination::Builder, Some(first)) = (decision, memberships.first()) else {
            return (decision, false);
        };

        match self.backend.template_exists(token, first.id).await {
            Ok(true) => (Destination::Builder, false),
            Ok(false) => {
                debug!(business_id = first.id, "Template file missing despite status");
                (Destination::UploadTemplate(first.id), false)
            }
            Err(e) => {
                warn!(business_id = first.id, error = %e, "Template check failed, landing on builder");
                (Destination::Builder, true)
            }
        }
    }
}

/// Translate a backend login rejection into the portal's error.
fn login_error(error: AppError, email: &str) -> AppError {
    match error {
        AppError::Backend {
            status: 403,
            detail: Some(detail),
        } if detail.contains(DEFAULT_PASSWORD_DETAIL) => AppError::PasswordResetRequired {
            email: email.to_string(),
        },
        AppError::Backend { status, detail } if status < 500 => AppError::InvalidCredentials(
            detail.unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string()),
        ),
        AppError::NotFound => AppError::InvalidCredentials(LOGIN_FAILED_MESSAGE.to_string()),
        other => other,
    }
}

#[async_trait]
impl SessionService for SessionManager {
    async fn identify(&self, raw: Option<&str>) -> Viewer {
        let Some(token) = raw.and_then(token::normalize) else {
            return Viewer::anonymous();
        };

        if let Err(e) = token::inspect(token) {
            debug!(error = %e, "Rejected bearer token without backend call");
            return Viewer::anonymous();
        }

        match self.backend.current_user(token).await {
            Ok(user) => Viewer::signed_in(token, user),
            Err(e) => {
                debug!(error = %e, "Identity fetch failed, treating viewer as anonymous");
                Viewer::anonymous()
            }
        }
    }

    async fn landing(&self, viewer: &Viewer) -> Landing {
        let role = viewer.role();
        let (destination, degraded) = match (role, viewer.require_session()) {
            (Role::Standard, Ok((token, user))) => self.standard_landing(token, user).await,
            _ => (post_login_destination(role, &[]), false),
        };

        Landing::new(role, destination, degraded)
    }

    async fn login(&self, credentials: &Credentials) -> AppResult<LoginOutcome> {
        let issued = self
            .backend
            .login(&credentials.email_id, &credentials.password)
            .await
            .map_err(|e| login_error(e, &credentials.email_id))?;

        let viewer = self.identify(Some(&issued.access_token)).await;
        let landing = self.landing(&viewer).await;
        info!(role = %landing.role, path = %landing.path, "User signed in");

        Ok(LoginOutcome {
            access_token: issued.access_token,
            token_type: issued.token_type,
            landing,
        })
    }

    async fn signup(&self, form: &SignupForm) -> AppResult<()> {
        self.backend.signup(form).await?;
        info!("New account registered");
        Ok(())
    }

    async fn forgot_password(&self, form: &ForgotPasswordForm) -> AppResult<()> {
        self.backend.forgot_password(form).await
    }

    async fn reset_password(&self, form: &ResetPasswordForm) -> AppResult<()> {
        self.backend.reset_password(form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::business::tests::business;
    use crate::domain::{AccessToken, TemplateStatus};
    use crate::infra::token::tests::token_valid_for;
    use crate::infra::MockBackendClient;
    use mockall::predicate::eq;

    fn manager(mock: MockBackendClient) -> SessionManager {
        SessionManager::new(Arc::new(mock))
    }

    fn standard_user() -> UserSession {
        UserSession::new(7, vec!["User".to_string()])
    }

    fn standard_viewer() -> Viewer {
        Viewer::signed_in("token", standard_user())
    }

    #[tokio::test]
    async fn test_identify_without_token_is_anonymous() {
        let mut mock = MockBackendClient::new();
        mock.expect_current_user().never();

        let viewer = manager(mock).identify(None).await;
        assert_eq!(viewer.role(), Role::Anonymous);
    }

    #[tokio::test]
    async fn test_identify_malformed_token_skips_backend() {
        let mut mock = MockBackendClient::new();
        mock.expect_current_user().never();

        let viewer = manager(mock).identify(Some("Bearer garbage")).await;
        assert_eq!(viewer.role(), Role::Anonymous);
    }

    #[tokio::test]
    async fn test_identify_resolves_admin() {
        let token = token_valid_for(30);
        let mut mock = MockBackendClient::new();
        mock.expect_current_user()
            .with(eq(token.clone()))
            .returning(|_| Ok(UserSession::new(1, vec!["Admin".to_string()])));

        let viewer = manager(mock)
            .identify(Some(&format!("Bearer {}", token)))
            .await;
        assert_eq!(viewer.role(), Role::Admin);
    }

    #[tokio::test]
    async fn test_identify_backend_failure_is_anonymous() {
        let mut mock = MockBackendClient::new();
        mock.expect_current_user()
            .returning(|_| Err(AppError::backend(500, None)));

        let viewer = manager(mock).identify(Some(&token_valid_for(30))).await;
        assert_eq!(viewer.role(), Role::Anonymous);
    }

    #[tokio::test]
    async fn test_landing_anonymous_goes_to_login() {
        let landing = manager(MockBackendClient::new())
            .landing(&Viewer::anonymous())
            .await;
        assert_eq!(landing.destination, Destination::Login);
        assert_eq!(landing.path, "/login");
        assert!(!landing.degraded);
    }

    #[tokio::test]
    async fn test_landing_admin_skips_business_lookup() {
        let mut mock = MockBackendClient::new();
        mock.expect_user_businesses().never();

        let viewer = Viewer::signed_in("token", UserSession::new(1, vec!["ADMIN".to_string()]));
        let landing = manager(mock).landing(&viewer).await;
        assert_eq!(landing.destination, Destination::AdminDashboard);
    }

    #[tokio::test]
    async fn test_landing_without_business_creates_one() {
        let mut mock = MockBackendClient::new();
        mock.expect_user_businesses()
            .with(eq("token"), eq(7_i64))
            .returning(|_, _| Ok(vec![]));

        let landing = manager(mock).landing(&standard_viewer()).await;
        assert_eq!(landing.destination, Destination::CreateBusiness);
        assert_eq!(landing.path, "/create-business");
    }

    #[tokio::test]
    async fn test_landing_missing_status_uploads_template() {
        let mut mock = MockBackendClient::new();
        mock.expect_user_businesses()
            .returning(|_, _| Ok(vec![business(5, "Bakery", TemplateStatus::Missing)]));
        mock.expect_template_exists().never();

        let landing = manager(mock).landing(&standard_viewer()).await;
        assert_eq!(landing.destination, Destination::UploadTemplate(5));
        assert_eq!(landing.path, "/upload-template/5");
    }

    #[tokio::test]
    async fn test_landing_active_with_template_is_builder() {
        let mut mock = MockBackendClient::new();
        mock.expect_user_businesses()
            .returning(|_, _| Ok(vec![business(5, "Bakery", TemplateStatus::Active)]));
        mock.expect_template_exists()
            .with(eq("token"), eq(5_i64))
            .returning(|_, _| Ok(true));

        let landing = manager(mock).landing(&standard_viewer()).await;
        assert_eq!(landing.destination, Destination::Builder);
        assert!(!landing.degraded);
    }

    #[tokio::test]
    async fn test_landing_template_not_found_uploads_template() {
        let mut mock = MockBackendClient::new();
        mock.expect_user_businesses()
            .returning(|_, _| Ok(vec![business(5, "Bakery", TemplateStatus::Pending)]));
        mock.expect_template_exists().returning(|_, _| Ok(false));

        let landing = manager(mock).landing(&standard_viewer()).await;
        assert_eq!(landing.destination, Destination::UploadTemplate(5));
        assert!(!landing.degraded);
    }

    #[tokio::test]
    async fn test_landing_template_check_failure_is_degraded_builder() {
        let mut mock = MockBackendClient::new();
        mock.expect_user_businesses()
            .returning(|_, _| Ok(vec![business(5, "Bakery", TemplateStatus::Active)]));
        mock.expect_template_exists()
            .returning(|_, _| Err(AppError::backend(500, None)));

        let landing = manager(mock).landing(&standard_viewer()).await;
        assert_eq!(landing.destination, Destination::Builder);
        assert!(landing.degraded);
    }

    #[tokio::test]
    async fn test_landing_listing_failure_is_degraded_builder() {
        let mut mock = MockBackendClient::new();
        mock.expect_user_businesses()
            .returning(|_, _| Err(AppError::backend(503, None)));

        let landing = manager(mock).landing(&standard_viewer()).await;
        assert_eq!(landing.destination, Destination::Builder);
        assert!(landing.degraded);
    }

    #[tokio::test]
    async fn test_login_default_password_requires_reset() {
        let mut mock = MockBackendClient::new();
        mock.expect_login().returning(|_, _| {
            Err(AppError::backend(
                403,
                Some("Default password detected. Please reset.".to_string()),
            ))
        });

        let credentials = Credentials {
            email_id: "owner@example.com".to_string(),
            password: "12345678".to_string(),
        };
        let err = manager(mock).login(&credentials).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::PasswordResetRequired { ref email } if email == "owner@example.com"
        ));
    }

    #[tokio::test]
    async fn test_login_rejection_uses_fallback_message() {
        let mut mock = MockBackendClient::new();
        mock.expect_login()
            .returning(|_, _| Err(AppError::backend(401, None)));

        let credentials = Credentials {
            email_id: "owner@example.com".to_string(),
            password: "wrong-password".to_string(),
        };
        let err = manager(mock).login(&credentials).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials(ref m) if m == LOGIN_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_login_resolves_landing() {
        let token = token_valid_for(30);
        let issued = token.clone();
        let mut mock = MockBackendClient::new();
        mock.expect_login()
            .with(eq("owner@example.com"), eq("secret123"))
            .returning(move |_, _| {
                Ok(AccessToken {
                    access_token: issued.clone(),
                    token_type: "bearer".to_string(),
                })
            });
        mock.expect_current_user()
            .returning(|_| Ok(standard_user()));
        mock.expect_user_businesses().returning(|_, _| Ok(vec![]));

        let credentials = Credentials {
            email_id: "owner@example.com".to_string(),
            password: "secret123".to_string(),
        };
        let outcome = manager(mock).login(&credentials).await.unwrap();
        assert_eq!(outcome.access_token, token);
        assert_eq!(outcome.landing.role, Role::Standard);
        assert_eq!(outcome.landing.destination, Destination::CreateBusiness);
    }

    #[test]
    fn test_viewer_guards() {
        assert!(matches!(
            Viewer::anonymous().require_session(),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            standard_viewer().require_admin(),
            Err(AppError::Forbidden)
        ));
        let admin = Viewer::signed_in("t", UserSession::new(1, vec!["admin".to_string()]));
        assert_eq!(admin.require_admin().unwrap(), "t");
    }
}
