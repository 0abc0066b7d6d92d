//! Account forms forwarded to the backend auth endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Login form
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "owner@example.com")]
    pub email_id: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    #[schema(example = "secret123", min_length = 6)]
    pub password: String,
}

/// Access token issued by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AccessToken {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    #[serde(default = "bearer")]
    #[schema(example = "bearer")]
    pub token_type: String,
}

fn bearer() -> String {
    "bearer".to_string()
}

/// Sign-up form
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Jane Doe")]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "owner@example.com")]
    pub email_id: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// Forgot-password form
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordForm {
    #[validate(email(message = "Invalid email format"))]
    pub email_id: String,
}

/// Reset-password form. The confirmation never reaches the backend.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_confirmation", skip_on_field_errors = false))]
pub struct ResetPasswordForm {
    #[validate(email(message = "Invalid email format"))]
    pub email_id: String,
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
}

fn validate_confirmation(form: &ResetPasswordForm) -> Result<(), ValidationError> {
    if form.new_password != form.confirm_password {
        let mut error = ValidationError::new("mismatch");
        error.message = Some("Passwords do not match".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_validation() {
        let ok = Credentials {
            email_id: "owner@example.com".to_string(),
            password: "secret123".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short = Credentials {
            password: "123".to_string(),
            ..ok.clone()
        };
        assert!(short.validate().is_err());

        let bad_email = Credentials {
            email_id: "owner".to_string(),
            ..ok
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_reset_confirmation_must_match() {
        let form: ResetPasswordForm = serde_json::from_value(serde_json::json!({
            "emailId": "owner@example.com",
            "currentPassword": "12345678",
            "newPassword": "better-secret",
            "confirmPassword": "better-secret"
        }))
        .unwrap();
        assert!(form.validate().is_ok());

        let wire = serde_json::to_value(&form).unwrap();
        assert!(wire.get("confirmPassword").is_none());
        assert_eq!(wire["newPassword"], "better-secret");

        let mismatch = ResetPasswordForm {
            confirm_password: "other".to_string(),
            ..form
        };
        assert!(mismatch.validate().is_err());
    }

    #[test]
    fn test_token_type_defaults_to_bearer() {
        let token: AccessToken = serde_json::from_str(r#"{"access_token": "abc"}"#).unwrap();
        assert_eq!(token.token_type, "bearer");
    }
}
