//! Invoice service - Invoice generation and listings.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::Viewer;
use crate::domain::{Invoice, InvoiceDraft, TemplateStatus};
use crate::errors::{AppError, AppResult};
use crate::infra::BackendClient;

/// Rendered invoice document
#[derive(Debug, Clone)]
pub struct GeneratedInvoice {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Invoice service trait for dependency injection.
#[async_trait]
pub trait InvoiceService: Send + Sync {
    /// Fill in the amount words and render the invoice PDF
    async fn generate(&self, viewer: &Viewer, draft: InvoiceDraft) -> AppResult<GeneratedInvoice>;

    /// Admins see every invoice (or one business), others their own
    async fn list(&self, viewer: &Viewer, business_id: Option<i64>) -> AppResult<Vec<Invoice>>;

    async fn delete(&self, viewer: &Viewer, invoice_id: i64) -> AppResult<()>;
}

/// Concrete implementation of InvoiceService backed by the invoice backend.
pub struct InvoiceManager {
    backend: Arc<dyn BackendClient>,
}

impl InvoiceManager {
    pub fn new(backend: Arc<dyn BackendClient>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl InvoiceService for InvoiceManager {
    async fn generate(
        &self,
        viewer: &Viewer,
        mut draft: InvoiceDraft,
    ) -> AppResult<GeneratedInvoice> {
        let (token, user) = viewer.require_session()?;

        let business = self.backend.get_business(token, draft.business_id).await?;
        if !viewer.role().is_admin() && business.user_id != user.user_id {
            return Err(AppError::Forbidden);
        }
        if business.template_status == TemplateStatus::Missing {
            return Err(AppError::TemplateMissing {
                business_id: business.business_id,
            });
        }

        draft.fill_amount_in_words()?;
        let bytes = self.backend.generate_invoice(token, &draft).await?;
        info!(
            business_id = draft.business_id,
            invoice_number = %draft.invoice_number,
            size = bytes.len(),
            "Invoice generated"
        );

        Ok(GeneratedInvoice {
            file_name: draft.file_name(),
            bytes,
        })
    }

    async fn list(&self, viewer: &Viewer, business_id: Option<i64>) -> AppResult<Vec<Invoice>> {
        let (token, user) = viewer.require_session()?;

        if viewer.role().is_admin() {
            return match business_id {
                Some(id) => self.backend.business_invoices(token, id).await,
                None => self.backend.list_invoices(token).await,
            };
        }

        let mut invoices = self.backend.user_invoices(token, user.user_id).await?;
        if let Some(id) = business_id {
            invoices.retain(|invoice| invoice.business_id == id);
        }
        Ok(invoices)
    }

    async fn delete(&self, viewer: &Viewer, invoice_id: i64) -> AppResult<()> {
        let (token, _) = viewer.require_session()?;
        self.backend.delete_invoice(token, invoice_id).await?;
        info!(invoice_id, "Invoice deleted");
        Ok(())
    }
}
