//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Session
// =============================================================================

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Administrator role name (compared case-insensitively)
pub const ROLE_ADMIN: &str = "admin";

/// Backend detail text returned when an account still uses its issued password
pub const DEFAULT_PASSWORD_DETAIL: &str = "Default password detected";

/// Fallback message when the backend rejects a login without detail
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password. Please try again.";

// =============================================================================
// Front-end Routes
// =============================================================================

pub const PATH_HOME: &str = "/home";
pub const PATH_PRICING: &str = "/pricing";
pub const PATH_LOGIN: &str = "/login";
pub const PATH_SIGNUP: &str = "/signup";
pub const PATH_FORGOT_PASSWORD: &str = "/forgot-password";
pub const PATH_RESET_PASSWORD: &str = "/reset-password";
pub const PATH_BUILDER: &str = "/builder";
pub const PATH_INVOICES: &str = "/invoices";
pub const PATH_CREATE_BUSINESS: &str = "/create-business";
pub const PATH_UPLOAD_TEMPLATE: &str = "/upload-template";
pub const PATH_ADMIN_TEMPLATES: &str = "/admin/templates";
pub const PATH_ADMIN_SUBSCRIPTIONS: &str = "/admin/subscriptions";
pub const PATH_ADMIN_DASHBOARD: &str = "/admin/dashboard";

// =============================================================================
// Templates
// =============================================================================

/// Content types accepted for an owner's template upload
pub const TEMPLATE_CONTENT_TYPES: &[&str] = &["application/pdf", "image/jpeg", "image/png"];

/// Content type of a processed (admin) template and of generated invoices
pub const CONTENT_TYPE_PDF: &str = "application/pdf";

/// Header carrying the original file name of an uploaded template
pub const FILE_NAME_HEADER: &str = "x-file-name";

/// File name used when the client does not send one
pub const DEFAULT_TEMPLATE_FILE_NAME: &str = "template";

// =============================================================================
// Invoices
// =============================================================================

pub const DEFAULT_PAYMENT_MODE: &str = "Cash";
pub const DEFAULT_PAYMENT_TYPE: &str = "Full";

// =============================================================================
// Subscriptions
// =============================================================================

/// Display order of plans on the pricing page, matched by name fragment
pub const PRICING_PLAN_ORDER: &[&str] = &["free trial", "basic", "standard", "premium"];

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Invoice Backend
// =============================================================================

/// Default invoice backend URL (for development)
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Default timeout for a single backend request
pub const DEFAULT_BACKEND_TIMEOUT_SECONDS: u64 = 30;
