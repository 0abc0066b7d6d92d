//! API middleware.

mod auth;

pub use auth::{bearer_token, require_admin, require_session, viewer_middleware};
