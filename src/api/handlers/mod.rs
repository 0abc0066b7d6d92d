//! HTTP request handlers.

pub mod admin_handler;
pub mod auth_handler;
pub mod business_handler;
pub mod invoice_handler;
pub mod pricing_handler;
pub mod session_handler;

pub use admin_handler::admin_routes;
pub use auth_handler::auth_routes;
pub use business_handler::business_routes;
pub use invoice_handler::{amount_routes, invoice_routes};
pub use pricing_handler::pricing_routes;
pub use session_handler::session_routes;
