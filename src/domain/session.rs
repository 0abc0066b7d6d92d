//! Viewer session and role classification.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::ROLE_ADMIN;

/// Role of the viewer as far as navigation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// No session, or the identity fetch failed
    Anonymous,
    /// Signed in without the admin role
    Standard,
    /// Signed in with the admin role
    Admin,
}

impl Role {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Check if a session is present
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Role::Anonymous)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Anonymous => write!(f, "anonymous"),
            Role::Standard => write!(f, "standard"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// The signed-in viewer, as reported by the backend "who am I" endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    #[schema(example = 42)]
    pub user_id: i64,
    /// Role names, compared case-insensitively
    #[schema(example = json!(["User"]))]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "owner@example.com")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Jane Doe")]
    pub full_name: Option<String>,
}

impl UserSession {
    pub fn new(user_id: i64, roles: Vec<String>) -> Self {
        Self {
            user_id,
            roles,
            email: None,
            full_name: None,
        }
    }

    /// Check whether any role matches `name`, ignoring case.
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r.trim().eq_ignore_ascii_case(name))
    }

    /// Up to two upper-case initials of the full name, `"U"` when unknown.
    pub fn initials(&self) -> String {
        let initials: String = self
            .full_name
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect();

        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }
}

/// Derive the viewer's role from an optional session.
///
/// Never fails: an absent session is `Anonymous`.
pub fn classify(user: Option<&UserSession>) -> Role {
    match user {
        None => Role::Anonymous,
        Some(user) if user.has_role(ROLE_ADMIN) => Role::Admin,
        Some(_) => Role::Standard,
    }
}
