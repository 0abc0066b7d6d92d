//! Infrastructure layer - External systems integration
//!
//! - HTTP client for the invoice backend
//! - Access token inspection

pub mod backend;
pub mod token;

pub use backend::{BackendClient, HttpBackend};

#[cfg(any(test, feature = "test-utils"))]
pub use backend::MockBackendClient;
