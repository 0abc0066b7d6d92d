//! Invoice portal - session-aware front door to an invoice backend
//!
//! Decides where a signed-in user lands, which front-end pages a role may
//! open, spells invoice amounts out in words, and forwards everything else
//! to the invoice backend.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Amount in words, role classification, navigation decisions
//! - **services**: Use cases orchestrating the backend and the domain
//! - **infra**: Invoice backend client, token inspection
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Spell out an amount
//! cargo run -- words 1234.56
//!
//! # Where does this token land?
//! cargo run -- landing --token "$TOKEN"
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{amount_in_words, classify, post_login_destination, Destination, Role};
pub use errors::{AppError, AppResult};
