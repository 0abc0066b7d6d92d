//! Service Container - Centralized service access.
//!
//! All services share one backend client.

use std::sync::Arc;

use super::{
    AdminManager, AdminService, BusinessManager, BusinessService, InvoiceManager, InvoiceService,
    SessionManager, SessionService,
};
use crate::infra::BackendClient;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn session(&self) -> Arc<dyn SessionService>;

    fn businesses(&self) -> Arc<dyn BusinessService>;

    fn invoices(&self) -> Arc<dyn InvoiceService>;

    fn admin(&self) -> Arc<dyn AdminService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    session_service: Arc<dyn SessionService>,
    business_service: Arc<dyn BusinessService>,
    invoice_service: Arc<dyn InvoiceService>,
    admin_service: Arc<dyn AdminService>,
}

impl Services {
    /// Wire every service to the given backend client
    pub fn from_backend(backend: Arc<dyn BackendClient>) -> Self {
        Self {
            session_service: Arc::new(SessionManager::new(backend.clone())),
            business_service: Arc::new(BusinessManager::new(backend.clone())),
            invoice_service: Arc::new(InvoiceManager::new(backend.clone())),
            admin_service: Arc::new(AdminManager::new(backend)),
        }
    }
}

impl ServiceContainer for Services {
    fn session(&self) -> Arc<dyn SessionService> {
        self.session_service.clone()
    }

    fn businesses(&self) -> Arc<dyn BusinessService> {
        self.business_service.clone()
    }

    fn invoices(&self) -> Arc<dyn InvoiceService> {
        self.invoice_service.clone()
    }

    fn admin(&self) -> Arc<dyn AdminService> {
        self.admin_service.clone()
    }
}
