//! Navigation decisions: where a viewer lands after login, and which pages a
//! role may open.

use serde::Serialize;
use utoipa::ToSchema;

use super::business::{BusinessMembership, TemplateStatus};
use super::session::Role;
use crate::config::{
    PATH_ADMIN_DASHBOARD, PATH_BUILDER, PATH_CREATE_BUSINESS, PATH_HOME, PATH_LOGIN,
    PATH_UPLOAD_TEMPLATE,
};

/// Page a viewer is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", content = "businessId", rename_all = "snake_case")]
pub enum Destination {
    AdminDashboard,
    CreateBusiness,
    UploadTemplate(i64),
    Builder,
    Login,
}

impl Destination {
    /// Front-end path of the destination.
    pub fn path(&self) -> String {
        match self {
            Destination::AdminDashboard => PATH_ADMIN_DASHBOARD.to_string(),
            Destination::CreateBusiness => PATH_CREATE_BUSINESS.to_string(),
            Destination::UploadTemplate(id) => format!("{}/{}", PATH_UPLOAD_TEMPLATE, id),
            Destination::Builder => PATH_BUILDER.to_string(),
            Destination::Login => PATH_LOGIN.to_string(),
        }
    }
}

/// Decide where a viewer lands after signing in.
///
/// Only the first business is considered. `Anonymous` viewers go to the login
/// page.
pub fn post_login_destination(role: Role, businesses: &[BusinessMembership]) -> Destination {
    match role {
        Role::Anonymous => Destination::Login,
        Role::Admin => Destination::AdminDashboard,
        Role::Standard => match businesses.first() {
            None => Destination::CreateBusiness,
            Some(first) if first.template_status == TemplateStatus::Missing => {
                Destination::UploadTemplate(first.id)
            }
            Some(_) => Destination::Builder,
        },
    }
}

/// Who may open a front-end page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    Public,
    Session,
    Admin,
}

/// Outcome of a route guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "outcome", content = "to", rename_all = "lowercase")]
pub enum Access {
    Allow,
    Redirect(String),
}

/// Front-end route with its guard.
#[derive(Debug, Clone, Copy)]
struct Route {
    segments: &'static [&'static str],
    requirement: Requirement,
}

/// Parameter segment matching one numeric id.
const ID_PARAM: &str = ":id";

macro_rules! route {
    ($requirement:ident, [$($segment:expr),+]) => {
        Route {
            segments: &[$($segment),+],
            requirement: Requirement::$requirement,
        }
    };
}

static ROUTES: &[Route] = &[
    route!(Public, ["home"]),
    route!(Public, ["pricing"]),
    route!(Public, ["login"]),
    route!(Public, ["signup"]),
    route!(Public, ["forgot-password"]),
    route!(Public, ["reset-password"]),
    route!(Session, ["builder"]),
    route!(Session, ["invoices"]),
    route!(Session, ["create-business"]),
    route!(Session, ["upload-template", ID_PARAM]),
    route!(Admin, ["admin", "templates"]),
    route!(Admin, ["admin", "subscriptions"]),
    route!(Admin, ["admin", "dashboard"]),
];

/// Static front-end route table.
pub struct RouteTable;

impl RouteTable {
    /// Requirement of a path, `None` when the path is not a known page.
    pub fn requirement(path: &str) -> Option<Requirement> {
        let segments = split_path(path);
        ROUTES
            .iter()
            .find(|route| matches_route(route, &segments))
            .map(|route| route.requirement)
    }

    /// Decide whether `role` may open `path`.
    ///
    /// The empty path redirects to the home page and unknown paths to the
    /// login page.
    pub fn check(path: &str, role: Role) -> Access {
        if split_path(path).is_empty() {
            return Access::Redirect(PATH_HOME.to_string());
        }

        match Self::requirement(path) {
            None => Access::Redirect(PATH_LOGIN.to_string()),
            Some(Requirement::Public) => Access::Allow,
            Some(Requirement::Session) => match role {
                Role::Anonymous => Access::Redirect(PATH_LOGIN.to_string()),
                _ => Access::Allow,
            },
            Some(Requirement::Admin) => match role {
                Role::Admin => Access::Allow,
                Role::Standard => Access::Redirect(PATH_BUILDER.to_string()),
                Role::Anonymous => Access::Redirect(PATH_LOGIN.to_string()),
            },
        }
    }

    /// All known page paths, parameters left as `:id`.
    pub fn paths() -> Vec<String> {
        ROUTES
            .iter()
            .map(|route| format!("/{}", route.segments.join("/")))
            .collect()
    }
}

fn split_path(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn matches_route(route: &Route, segments: &[&str]) -> bool {
    route.segments.len() == segments.len()
        && route
            .segments
            .iter()
            .zip(segments)
            .all(|(expected, actual)| match *expected {
                ID_PARAM => !actual.is_empty() && actual.chars().all(|c| c.is_ascii_digit()),
                literal => literal == *actual,
            })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i64, status: TemplateStatus) -> BusinessMembership {
        BusinessMembership::new(id, status)
    }

    #[test]
    fn test_admin_lands_on_dashboard() {
        assert_eq!(
            post_login_destination(Role::Admin, &[]),
            Destination::AdminDashboard
        );
        assert_eq!(
            post_login_destination(Role::Admin, &[member(1, TemplateStatus::Missing)]),
            Destination::AdminDashboard
        );
    }

    #[test]
    fn test_standard_without_business_creates_one() {
        assert_eq!(
            post_login_destination(Role::Standard, &[]),
            Destination::CreateBusiness
        );
    }

    #[test]
    fn test_standard_missing_template_uploads() {
        assert_eq!(
            post_login_destination(Role::Standard, &[member(5, TemplateStatus::Missing)]),
            Destination::UploadTemplate(5)
        );
    }

    #[test]
    fn test_standard_with_template_builds() {
        assert_eq!(
            post_login_destination(Role::Standard, &[member(5, TemplateStatus::Active)]),
            Destination::Builder
        );
        assert_eq!(
            post_login_destination(Role::Standard, &[member(5, TemplateStatus::Pending)]),
            Destination::Builder
        );
    }

    #[test]
    fn test_only_first_business_counts() {
        let businesses = [
            member(5, TemplateStatus::Active),
            member(6, TemplateStatus::Missing),
        ];
        assert_eq!(
            post_login_destination(Role::Standard, &businesses),
            Destination::Builder
        );
    }

    #[test]
    fn test_anonymous_goes_to_login() {
        assert_eq!(
            post_login_destination(Role::Anonymous, &[]),
            Destination::Login
        );
    }

    #[test]
    fn test_destination_paths() {
        assert_eq!(Destination::AdminDashboard.path(), "/admin/dashboard");
        assert_eq!(Destination::CreateBusiness.path(), "/create-business");
        assert_eq!(Destination::UploadTemplate(9).path(), "/upload-template/9");
        assert_eq!(Destination::Builder.path(), "/builder");
        assert_eq!(Destination::Login.path(), "/login");
    }

    #[test]
    fn test_destination_serialization() {
        let json = serde_json::to_value(Destination::UploadTemplate(9)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "upload_template", "businessId": 9}));

        let json = serde_json::to_value(Destination::Builder).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "builder"}));
    }

    #[test]
    fn test_public_pages_always_allowed() {
        for path in ["/home", "/pricing", "/login", "/signup", "/reset-password"] {
            assert_eq!(RouteTable::check(path, Role::Anonymous), Access::Allow);
        }
    }

    #[test]
    fn test_session_pages() {
        assert_eq!(
            RouteTable::check("/builder", Role::Anonymous),
            Access::Redirect("/login".to_string())
        );
        assert_eq!(RouteTable::check("/builder", Role::Standard), Access::Allow);
        assert_eq!(
            RouteTable::check("/upload-template/12", Role::Standard),
            Access::Allow
        );
    }

    #[test]
    fn test_admin_pages() {
        assert_eq!(
            RouteTable::check("/admin/dashboard", Role::Anonymous),
            Access::Redirect("/login".to_string())
        );
        assert_eq!(
            RouteTable::check("/admin/dashboard", Role::Standard),
            Access::Redirect("/builder".to_string())
        );
        assert_eq!(
            RouteTable::check("/admin/dashboard", Role::Admin),
            Access::Allow
        );
    }

    #[test]
    fn test_empty_and_unknown_paths() {
        assert_eq!(
            RouteTable::check("", Role::Admin),
            Access::Redirect("/home".to_string())
        );
        assert_eq!(
            RouteTable::check("/", Role::Standard),
            Access::Redirect("/home".to_string())
        );
        assert_eq!(
            RouteTable::check("/nowhere", Role::Admin),
            Access::Redirect("/login".to_string())
        );
        assert_eq!(
            RouteTable::check("/upload-template/abc", Role::Standard),
            Access::Redirect("/login".to_string())
        );
    }

    #[test]
    fn test_path_normalization() {
        assert_eq!(
            RouteTable::requirement("admin/templates/"),
            Some(Requirement::Admin)
        );
        assert_eq!(
            RouteTable::requirement("/reset-password?emailId=a@b.c"),
            Some(Requirement::Public)
        );
    }

    #[test]
    fn test_every_page_constant_is_routed() {
        use crate::config::*;

        let pages = [
            PATH_HOME.to_string(),
            PATH_PRICING.to_string(),
            PATH_LOGIN.to_string(),
            PATH_SIGNUP.to_string(),
            PATH_FORGOT_PASSWORD.to_string(),
            PATH_RESET_PASSWORD.to_string(),
            PATH_BUILDER.to_string(),
            PATH_INVOICES.to_string(),
            PATH_CREATE_BUSINESS.to_string(),
            format!("{}/1", PATH_UPLOAD_TEMPLATE),
            PATH_ADMIN_TEMPLATES.to_string(),
            PATH_ADMIN_SUBSCRIPTIONS.to_string(),
            PATH_ADMIN_DASHBOARD.to_string(),
        ];
        for page in pages {
            assert!(RouteTable::requirement(&page).is_some(), "{} is not routed", page);
        }
    }

    #[test]
    fn test_paths_listing() {
        let paths = RouteTable::paths();
        assert!(paths.contains(&"/upload-template/:id".to_string()));
        assert_eq!(paths.len(), 13);
    }
}
