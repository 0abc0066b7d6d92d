//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `words` - Print an amount in words
//! - `landing` - Resolve a token's landing page against the backend

pub mod args;

pub use args::{Cli, Commands};
