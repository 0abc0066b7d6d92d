//! Application configuration module
//!
//! Environment-driven settings plus the constants shared by the portal
//! (front-end paths, backend defaults, role names).

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
