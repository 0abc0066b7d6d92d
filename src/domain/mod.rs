//! Domain layer - Core business entities and logic
//!
//! This module contains the decisions the portal makes on its own,
//! independent of the invoice backend and of HTTP.
//!
//! DDD: Domain layer has NO infrastructure dependencies (except error types).
//! Contains: Value Objects, pure decision functions, backend record shapes.

pub mod account;
pub mod amount;
pub mod business;
pub mod error;
pub mod invoice;
pub mod navigation;
pub mod session;
pub mod stats;
pub mod subscription;

pub use account::{AccessToken, Credentials, ForgotPasswordForm, ResetPasswordForm, SignupForm};
pub use amount::{amount_in_words, MonetaryAmount};
pub use business::{
    Business, BusinessMembership, BusinessType, BusinessTypeChoice, NewBusiness,
    NewBusinessType, TemplateFile, TemplateQueue, TemplateStatus, TemplateUpload,
    TemplateUploadResult,
};
pub use error::AmountError;
pub use invoice::{Invoice, InvoiceDraft};
pub use navigation::{post_login_destination, Access, Destination, Requirement, RouteTable};
pub use session::{classify, Role, UserSession};
pub use stats::{AdminStats, DistributionSlice, StatsCharts, TimelinePoint};
pub use subscription::{Subscription, SubscriptionForm, SubscriptionPlan, SubscriptionRow};
