//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, auth_handler, business_handler, invoice_handler, pricing_handler,
    session_handler,
};
use crate::domain::{
    AccessToken, Access, AdminStats, Business, BusinessType, Credentials, Destination,
    DistributionSlice, ForgotPasswordForm, Invoice, InvoiceDraft, NewBusiness, NewBusinessType,
    Requirement, ResetPasswordForm, Role, SignupForm, StatsCharts, Subscription,
    SubscriptionForm, SubscriptionPlan, SubscriptionRow, TemplateQueue, TemplateStatus,
    TemplateUploadResult, TimelinePoint, UserSession,
};
use crate::services::{CreatedBusiness, Landing, LoginOutcome, TemplatePresence};
use crate::types::MessageResponse;

/// OpenAPI documentation for the invoice portal
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Invoice Portal",
        version = "0.1.0",
        description = "Session-aware front door to the invoice backend: landing decisions, \
                       route guards, amount-in-words and invoice generation"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication
        auth_handler::login,
        auth_handler::signup,
        auth_handler::forgot_password,
        auth_handler::reset_password,
        // Session
        session_handler::current,
        session_handler::landing,
        session_handler::access,
        // Invoices
        invoice_handler::amount_words_query,
        invoice_handler::amount_words_body,
        invoice_handler::generate_invoice,
        invoice_handler::list_invoices,
        invoice_handler::delete_invoice,
        // Businesses and templates
        business_handler::list_businesses,
        business_handler::create_business,
        business_handler::get_business,
        business_handler::list_types,
        business_handler::create_type,
        business_handler::download_template,
        business_handler::template_status,
        business_handler::upload_template,
        // Admin
        admin_handler::stats,
        admin_handler::businesses,
        admin_handler::template_queue,
        admin_handler::upload_processed_template,
        admin_handler::plans,
        admin_handler::list_subscriptions,
        admin_handler::create_subscription,
        admin_handler::update_subscription,
        admin_handler::delete_subscription,
        // Pricing
        pricing_handler::pricing_plans,
    ),
    components(
        schemas(
            // Session
            Role,
            UserSession,
            Destination,
            Requirement,
            Access,
            Landing,
            session_handler::SessionView,
            session_handler::AccessView,
            // Accounts
            Credentials,
            AccessToken,
            LoginOutcome,
            SignupForm,
            ForgotPasswordForm,
            ResetPasswordForm,
            MessageResponse,
            // Businesses
            Business,
            BusinessType,
            NewBusiness,
            NewBusinessType,
            CreatedBusiness,
            TemplateStatus,
            TemplatePresence,
            TemplateUploadResult,
            TemplateQueue,
            // Invoices
            Invoice,
            InvoiceDraft,
            invoice_handler::AmountRequest,
            invoice_handler::AmountWords,
            // Admin
            AdminStats,
            StatsCharts,
            TimelinePoint,
            DistributionSlice,
            SubscriptionPlan,
            Subscription,
            SubscriptionForm,
            SubscriptionRow,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and account flows, forwarded to the backend"),
        (name = "Session", description = "Viewer role, landing page and route guards"),
        (name = "Invoices", description = "Amount in words, invoice generation and listings"),
        (name = "Businesses", description = "Businesses and their categories"),
        (name = "Templates", description = "Invoice template documents"),
        (name = "Admin", description = "Dashboard, template queue and subscriptions"),
        (name = "Pricing", description = "Public plan list")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Backend token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_portal_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/auth/login",
            "/session/landing",
            "/invoices/amount-in-words",
            "/businesses/{id}/template",
            "/admin/subscriptions/{id}",
            "/pricing/plans",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
