//! Application services layer - Use cases and business logic.
//!
//! Services fetch what the domain decisions need from the invoice backend
//! and enforce who may do what. They depend on the `BackendClient` trait,
//! never on the HTTP client directly.

mod admin_service;
mod business_service;
pub mod container;
mod invoice_service;
mod session_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use admin_service::{AdminManager, AdminService};
pub use business_service::{BusinessManager, BusinessService, CreatedBusiness, TemplatePresence};
pub use invoice_service::{GeneratedInvoice, InvoiceManager, InvoiceService};
pub use session_service::{Landing, LoginOutcome, SessionManager, SessionService, Viewer};
