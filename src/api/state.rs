//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{BackendClient, HttpBackend};
use crate::services::{
    AdminService, BusinessService, InvoiceService, ServiceContainer, Services, SessionService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<dyn SessionService>,
    pub business_service: Arc<dyn BusinessService>,
    pub invoice_service: Arc<dyn InvoiceService>,
    pub admin_service: Arc<dyn AdminService>,
    /// Invoice backend, for health checks
    pub backend: Arc<dyn BackendClient>,
    /// Allowed CORS origin, if any
    pub cors_allowed_origin: Option<String>,
}

impl AppState {
    /// Create application state talking to the configured backend.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let backend: Arc<dyn BackendClient> = Arc::new(HttpBackend::new(config)?);
        let mut state = Self::from_backend(backend);
        state.cors_allowed_origin = config.cors_allowed_origin.clone();
        Ok(state)
    }

    /// Create application state around any backend client.
    pub fn from_backend(backend: Arc<dyn BackendClient>) -> Self {
        let services = Services::from_backend(backend.clone());

        Self {
            session_service: services.session(),
            business_service: services.businesses(),
            invoice_service: services.invoices(),
            admin_service: services.admin(),
            backend,
            cors_allowed_origin: None,
        }
    }
}
