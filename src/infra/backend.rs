//! Invoice backend client.
//!
//! Every record the portal shows lives in the remote invoice backend. The
//! `BackendClient` trait is the seam the services depend on; `HttpBackend`
//! implements it with `reqwest`.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, multipart, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::config::{Config, CONTENT_TYPE_PDF};
use crate::domain::{
    AccessToken, AdminStats, Business, BusinessType, ForgotPasswordForm, Invoice, InvoiceDraft,
    NewBusiness, NewBusinessType, ResetPasswordForm, SignupForm, Subscription, SubscriptionForm,
    SubscriptionPlan, TemplateFile, TemplateUpload, TemplateUploadResult, UserSession,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Typed access to the invoice backend.
///
/// Methods taking a `token` forward it as a Bearer credential.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BackendClient: Send + Sync {
    // Authentication
    async fn login(&self, email: &str, password: &str) -> AppResult<AccessToken>;
    async fn signup(&self, form: &SignupForm) -> AppResult<()>;
    async fn forgot_password(&self, form: &ForgotPasswordForm) -> AppResult<()>;
    async fn reset_password(&self, form: &ResetPasswordForm) -> AppResult<()>;

    /// The signed-in user behind `token`
    async fn current_user(&self, token: &str) -> AppResult<UserSession>;

    // Businesses
    async fn list_businesses(&self, token: &str) -> AppResult<Vec<Business>>;
    async fn user_businesses(&self, token: &str, user_id: i64) -> AppResult<Vec<Business>>;
    async fn admin_businesses(&self, token: &str) -> AppResult<Vec<Business>>;
    async fn get_business(&self, token: &str, business_id: i64) -> AppResult<Business>;
    async fn create_business(&self, token: &str, business: &NewBusiness) -> AppResult<Business>;
    async fn business_types(&self, token: &str) -> AppResult<Vec<BusinessType>>;
    async fn create_business_type(
        &self,
        token: &str,
        business_type: &NewBusinessType,
    ) -> AppResult<BusinessType>;

    // Templates
    /// Fetch the stored template; a missing template is `AppError::NotFound`
    async fn fetch_template(&self, token: &str, business_id: i64) -> AppResult<TemplateFile>;
    /// Whether a template is stored, without downloading it
    async fn template_exists(&self, token: &str, business_id: i64) -> AppResult<bool>;
    async fn upload_template(
        &self,
        token: &str,
        business_id: i64,
        upload: TemplateUpload,
    ) -> AppResult<TemplateUploadResult>;

    // Invoices
    /// Render the invoice PDF
    async fn generate_invoice(&self, token: &str, draft: &InvoiceDraft) -> AppResult<Vec<u8>>;
    async fn list_invoices(&self, token: &str) -> AppResult<Vec<Invoice>>;
    async fn user_invoices(&self, token: &str, user_id: i64) -> AppResult<Vec<Invoice>>;
    async fn business_invoices(&self, token: &str, business_id: i64) -> AppResult<Vec<Invoice>>;
    async fn delete_invoice(&self, token: &str, invoice_id: i64) -> AppResult<()>;

    // Admin
    async fn admin_stats(&self, token: &str) -> AppResult<AdminStats>;
    async fn subscription_plans(&self) -> AppResult<Vec<SubscriptionPlan>>;
    async fn list_subscriptions(&self, token: &str) -> AppResult<Vec<Subscription>>;
    async fn create_subscription(
        &self,
        token: &str,
        form: &SubscriptionForm,
    ) -> AppResult<Subscription>;
    async fn update_subscription(
        &self,
        token: &str,
        subscription_id: i64,
        form: &SubscriptionForm,
    ) -> AppResult<Subscription>;
    async fn delete_subscription(&self, token: &str, subscription_id: i64) -> AppResult<()>;

    /// Check that the backend answers at all
    async fn ping(&self) -> AppResult<()>;
}

/// User record as returned by `/users/me`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackendUser {
    user_id: i64,
    #[serde(default)]
    email_id: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    roles: Vec<BackendRole>,
}

/// Roles arrive either as `{"roleName": "..."}` objects or as bare strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BackendRole {
    Record {
        #[serde(rename = "roleName", default)]
        role_name: Option<String>,
    },
    Name(String),
}

impl From<BackendUser> for UserSession {
    fn from(user: BackendUser) -> Self {
        let roles = user
            .roles
            .into_iter()
            .filter_map(|role| match role {
                BackendRole::Record { role_name } => role_name,
                BackendRole::Name(name) => Some(name),
            })
            .collect();

        UserSession {
            user_id: user.user_id,
            roles,
            email: user.email_id,
            full_name: user.full_name,
        }
    }
}

/// Error body of the backend
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Turn a `detail` value (string or list of validation errors) into text.
fn detail_text(detail: serde_json::Value) -> Option<String> {
    match detail {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .map(str::to_string)
                .collect();
            (!messages.is_empty()).then(|| messages.join(", "))
        }
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// `reqwest` implementation of `BackendClient`.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client for the configured backend.
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.backend_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.backend_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.get(self.url(path)).bearer_auth(token)
    }

    fn post(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.post(self.url(path)).bearer_auth(token)
    }

    /// Send a request and return the response if the status is a success.
    async fn send(request: RequestBuilder) -> AppResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<BackendErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .and_then(detail_text);
        debug!("Invoice backend answered {} ({:?})", status, detail);

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound);
        }
        Err(AppError::backend(status.as_u16(), detail))
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> AppResult<T> {
        Ok(Self::send(request).await?.json::<T>().await?)
    }

    async fn send_empty(request: RequestBuilder) -> AppResult<()> {
        Self::send(request).await?;
        Ok(())
    }

    async fn send_bytes(request: RequestBuilder) -> AppResult<(Option<String>, Vec<u8>)> {
        let response = Self::send(request).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        Ok((content_type, bytes.to_vec()))
    }

    fn json_body<B: Serialize + ?Sized>(request: RequestBuilder, body: &B) -> RequestBuilder {
        request.json(body)
    }
}

#[async_trait]
impl BackendClient for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> AppResult<AccessToken> {
        // OAuth2 password form: the email travels as `username`
        let request = self
            .client
            .post(self.url("/auth/token"))
            .form(&[("username", email), ("password", password)]);
        Self::send_json(request).await
    }

    async fn signup(&self, form: &SignupForm) -> AppResult<()> {
        let request = self.client.post(self.url("/auth/signup")).json(form);
        Self::send_empty(request).await
    }

    async fn forgot_password(&self, form: &ForgotPasswordForm) -> AppResult<()> {
        let request = self.client.post(self.url("/auth/forgot-password")).json(form);
        Self::send_empty(request).await
    }

    async fn reset_password(&self, form: &ResetPasswordForm) -> AppResult<()> {
        let request = self.client.post(self.url("/auth/reset-password")).json(form);
        Self::send_empty(request).await
    }

    async fn current_user(&self, token: &str) -> AppResult<UserSession> {
        let user: BackendUser = Self::send_json(self.get("/users/me", token)).await?;
        Ok(user.into())
    }

    async fn list_businesses(&self, token: &str) -> AppResult<Vec<Business>> {
        Self::send_json(self.get("/businesses/", token)).await
    }

    async fn user_businesses(&self, token: &str, user_id: i64) -> AppResult<Vec<Business>> {
        Self::send_json(self.get(&format!("/businesses/user/{}", user_id), token)).await
    }

    async fn admin_businesses(&self, token: &str) -> AppResult<Vec<Business>> {
        Self::send_json(self.get("/admin/businesses", token)).await
    }

    async fn get_business(&self, token: &str, business_id: i64) -> AppResult<Business> {
        Self::send_json(self.get(&format!("/businesses/{}", business_id), token)).await
    }

    async fn create_business(&self, token: &str, business: &NewBusiness) -> AppResult<Business> {
        let request = Self::json_body(self.post("/businesses/", token), business);
        Self::send_json(request).await
    }

    async fn business_types(&self, token: &str) -> AppResult<Vec<BusinessType>> {
        Self::send_json(self.get("/businesses/types/", token)).await
    }

    async fn create_business_type(
        &self,
        token: &str,
        business_type: &NewBusinessType,
    ) -> AppResult<BusinessType> {
        let request = Self::json_body(self.post("/businesses/types/", token), business_type);
        Self::send_json(request).await
    }

    async fn fetch_template(&self, token: &str, business_id: i64) -> AppResult<TemplateFile> {
        let (content_type, bytes) =
            Self::send_bytes(self.get(&format!("/pdf/template/{}", business_id), token)).await?;
        Ok(TemplateFile {
            content_type: content_type.unwrap_or_else(|| CONTENT_TYPE_PDF.to_string()),
            bytes,
        })
    }

    async fn template_exists(&self, token: &str, business_id: i64) -> AppResult<bool> {
        // The body is dropped unread; only the status matters here
        match Self::send(self.get(&format!("/pdf/template/{}", business_id), token)).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn upload_template(
        &self,
        token: &str,
        business_id: i64,
        upload: TemplateUpload,
    ) -> AppResult<TemplateUploadResult> {
        let part = multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)?;
        let form = multipart::Form::new().part("file", part);

        let request = self
            .post(&format!("/pdf/upload-template/{}", business_id), token)
            .multipart(form);
        Self::send_json(request).await
    }

    async fn generate_invoice(&self, token: &str, draft: &InvoiceDraft) -> AppResult<Vec<u8>> {
        let request = Self::json_body(self.post("/pdf/generate-invoice", token), draft);
        let (_, bytes) = Self::send_bytes(request).await?;
        Ok(bytes)
    }

    async fn list_invoices(&self, token: &str) -> AppResult<Vec<Invoice>> {
        Self::send_json(self.get("/invoices/", token)).await
    }

    async fn user_invoices(&self, token: &str, user_id: i64) -> AppResult<Vec<Invoice>> {
        Self::send_json(self.get(&format!("/invoices/user/{}", user_id), token)).await
    }

    async fn business_invoices(&self, token: &str, business_id: i64) -> AppResult<Vec<Invoice>> {
        Self::send_json(self.get(&format!("/invoices/business/{}", business_id), token)).await
    }

    async fn delete_invoice(&self, token: &str, invoice_id: i64) -> AppResult<()> {
        let request = self
            .client
            .delete(self.url(&format!("/invoices/{}", invoice_id)))
            .bearer_auth(token);
        Self::send_empty(request).await
    }

    async fn admin_stats(&self, token: &str) -> AppResult<AdminStats> {
        Self::send_json(self.get("/admin/stats", token)).await
    }

    async fn subscription_plans(&self) -> AppResult<Vec<SubscriptionPlan>> {
        Self::send_json(self.client.get(self.url("/subscriptions/plans"))).await
    }

    async fn list_subscriptions(&self, token: &str) -> AppResult<Vec<Subscription>> {
        Self::send_json(self.get("/subscriptions/", token)).await
    }

    async fn create_subscription(
        &self,
        token: &str,
        form: &SubscriptionForm,
    ) -> AppResult<Subscription> {
        let request = Self::json_body(self.post("/subscriptions/", token), form);
        Self::send_json(request).await
    }

    async fn update_subscription(
        &self,
        token: &str,
        subscription_id: i64,
        form: &SubscriptionForm,
    ) -> AppResult<Subscription> {
        let request = self
            .client
            .put(self.url(&format!("/subscriptions/{}", subscription_id)))
            .bearer_auth(token)
            .json(form);
        Self::send_json(request).await
    }

    async fn delete_subscription(&self, token: &str, subscription_id: i64) -> AppResult<()> {
        let request = self
            .client
            .delete(self.url(&format!("/subscriptions/{}", subscription_id)))
            .bearer_auth(token);
        Self::send_empty(request).await
    }

    async fn ping(&self) -> AppResult<()> {
        // Any HTTP answer means the backend is up
        self.client.get(self.url("/")).send().await?;
        Ok(())
    }
}
