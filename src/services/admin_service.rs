//! Admin service - Dashboard, template queue and subscriptions.
//!
//! Every operation except `pricing_plans` requires the admin role.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::try_join;
use tracing::info;

use super::Viewer;
use crate::domain::{
    AdminStats, Business, Subscription, SubscriptionForm, SubscriptionPlan, SubscriptionRow,
    TemplateQueue, TemplateUpload, TemplateUploadResult,
};
use crate::errors::AppResult;
use crate::infra::BackendClient;

/// Admin service trait for dependency injection.
#[async_trait]
pub trait AdminService: Send + Sync {
    async fn stats(&self, viewer: &Viewer) -> AppResult<AdminStats>;

    async fn businesses(&self, viewer: &Viewer) -> AppResult<Vec<Business>>;

    /// Businesses awaiting template work
    async fn template_queue(
        &self,
        viewer: &Viewer,
        show_all: bool,
        search: Option<String>,
    ) -> AppResult<TemplateQueue>;

    /// Store the processed PDF template of a business
    async fn upload_processed_template(
        &self,
        viewer: &Viewer,
        business_id: i64,
        upload: TemplateUpload,
    ) -> AppResult<TemplateUploadResult>;

    async fn plans(&self, viewer: &Viewer) -> AppResult<Vec<SubscriptionPlan>>;

    /// Public plan list in pricing page order
    async fn pricing_plans(&self) -> AppResult<Vec<SubscriptionPlan>>;

    /// Subscriptions with business and plan names
    async fn subscriptions(&self, viewer: &Viewer) -> AppResult<Vec<SubscriptionRow>>;

    async fn create_subscription(
        &self,
        viewer: &Viewer,
        form: SubscriptionForm,
    ) -> AppResult<Subscription>;

    async fn update_subscription(
        &self,
        viewer: &Viewer,
        subscription_id: i64,
        form: SubscriptionForm,
    ) -> AppResult<Subscription>;

    async fn delete_subscription(&self, viewer: &Viewer, subscription_id: i64) -> AppResult<()>;
}

/// Concrete implementation of AdminService backed by the invoice backend.
pub struct AdminManager {
    backend: Arc<dyn BackendClient>,
}

impl AdminManager {
    pub fn new(backend: Arc<dyn BackendClient>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl AdminService for AdminManager {
    async fn stats(&self, viewer: &Viewer) -> AppResult<AdminStats> {
        let token = viewer.require_admin()?;
        self.backend.admin_stats(token).await
    }

    async fn businesses(&self, viewer: &Viewer) -> AppResult<Vec<Business>> {
        let token = viewer.require_admin()?;
        self.backend.admin_businesses(token).await
    }

    async fn template_queue(
        &self,
        viewer: &Viewer,
        show_all: bool,
        search: Option<String>,
    ) -> AppResult<TemplateQueue> {
        let token = viewer.require_admin()?;
        let all = self.backend.admin_businesses(token).await?;
        Ok(TemplateQueue::build(all, show_all, search.as_deref()))
    }

    async fn upload_processed_template(
        &self,
        viewer: &Viewer,
        business_id: i64,
        upload: TemplateUpload,
    ) -> AppResult<TemplateUploadResult> {
        let token = viewer.require_admin()?;
        upload.ensure_processed_upload()?;

        let result = self
            .backend
            .upload_template(token, business_id, upload)
            .await?;
        info!(business_id, status = %result.template_status, "Processed template stored");
        Ok(result)
    }

    async fn plans(&self, viewer: &Viewer) -> AppResult<Vec<SubscriptionPlan>> {
        viewer.require_admin()?;
        self.backend.subscription_plans().await
    }

    async fn pricing_plans(&self) -> AppResult<Vec<SubscriptionPlan>> {
        let plans = self.backend.subscription_plans().await?;
        Ok(SubscriptionPlan::sort_for_pricing(plans))
    }

    async fn subscriptions(&self, viewer: &Viewer) -> AppResult<Vec<SubscriptionRow>> {
        let token = viewer.require_admin()?;
        let (subscriptions, businesses, plans) = try_join!(
            self.backend.list_subscriptions(token),
            self.backend.admin_businesses(token),
            self.backend.subscription_plans(),
        )?;
        Ok(SubscriptionRow::enrich(subscriptions, &businesses, &plans))
    }

    async fn create_subscription(
        &self,
        viewer: &Viewer,
        form: SubscriptionForm,
    ) -> AppResult<Subscription> {
        let token = viewer.require_admin()?;
        let created = self.backend.create_subscription(token, &form).await?;
        info!(
            subscription_id = created.subscription_id,
            business_id = created.business_id,
            "Subscription created"
        );
        Ok(created)
    }

    async fn update_subscription(
        &self,
        viewer: &Viewer,
        subscription_id: i64,
        form: SubscriptionForm,
    ) -> AppResult<Subscription> {
        let token = viewer.require_admin()?;
        self.backend
            .update_subscription(token, subscription_id, &form)
            .await
    }

    async fn delete_subscription(&self, viewer: &Viewer, subscription_id: i64) -> AppResult<()> {
        let token = viewer.require_admin()?;
        self.backend.delete_subscription(token, subscription_id).await?;
        info!(subscription_id, "Subscription deleted");
        Ok(())
    }
}
