//! Business records, template status and template uploads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::{CONTENT_TYPE_PDF, TEMPLATE_CONTENT_TYPES};
use crate::errors::{AppError, AppResult};

/// State of a business's invoice template.
///
/// Unknown or absent values read as `Missing`, so a malformed record prompts
/// for an upload instead of opening the builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(from = "Option<String>", into = "String")]
pub enum TemplateStatus {
    #[default]
    Missing,
    /// Uploaded as an image, waiting for an admin to convert it
    Pending,
    Active,
}

impl TemplateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateStatus::Missing => "MISSING",
            TemplateStatus::Pending => "PENDING",
            TemplateStatus::Active => "ACTIVE",
        }
    }

    /// Position in the admin template queue (pending first).
    fn queue_rank(&self) -> u8 {
        match self {
            TemplateStatus::Pending => 0,
            TemplateStatus::Missing => 1,
            TemplateStatus::Active => 2,
        }
    }
}

impl From<&str> for TemplateStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => TemplateStatus::Pending,
            "ACTIVE" => TemplateStatus::Active,
            _ => TemplateStatus::Missing,
        }
    }
}

impl From<Option<String>> for TemplateStatus {
    fn from(s: Option<String>) -> Self {
        s.as_deref().map(TemplateStatus::from).unwrap_or_default()
    }
}

impl From<TemplateStatus> for String {
    fn from(status: TemplateStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for TemplateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business record as stored by the invoice backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    #[schema(example = 5)]
    pub business_id: i64,
    #[schema(example = "Corner Bakery")]
    pub business_name: String,
    pub business_type_id: i64,
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_website: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub template_status: TemplateStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
}

/// The part of a business that navigation decisions look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessMembership {
    pub id: i64,
    pub template_status: TemplateStatus,
}

impl BusinessMembership {
    pub fn new(id: i64, template_status: TemplateStatus) -> Self {
        Self { id, template_status }
    }
}

impl From<&Business> for BusinessMembership {
    fn from(business: &Business) -> Self {
        Self {
            id: business.business_id,
            template_status: business.template_status,
        }
    }
}

/// Business category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessType {
    #[schema(example = 3)]
    pub business_type_id: i64,
    #[schema(example = "Retail")]
    pub business_type_name: String,
}

/// New business category request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBusinessType {
    #[validate(length(min = 1, message = "Business type name is required"))]
    #[schema(example = "Catering")]
    pub business_type_name: String,
}

/// Create-business form.
///
/// Either `businessTypeId` or `newBusinessTypeName` must be present. The new
/// type name never reaches the backend business endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBusiness {
    #[validate(length(min = 1, message = "Business name is required"))]
    #[schema(example = "Corner Bakery")]
    pub business_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_type_id: Option<i64>,
    #[serde(default, skip_serializing)]
    #[schema(example = "Catering")]
    pub new_business_type_name: Option<String>,
    #[validate(length(min = 1, message = "Address is required"))]
    pub business_address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub business_city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub business_state: String,
    #[serde(default)]
    pub business_country: Option<String>,
    #[validate(length(min = 1, message = "Zip code is required"))]
    pub business_zip: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub business_phone: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "hello@cornerbakery.example")]
    pub business_email: String,
    #[serde(default)]
    pub business_website: Option<String>,
    /// Filled from the session; any client value is overwritten
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// How the create-business form picked its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusinessTypeChoice {
    Existing(i64),
    New(String),
}

impl NewBusiness {
    /// Resolve the category choice; a non-blank new type name wins.
    pub fn type_choice(&self) -> AppResult<BusinessTypeChoice> {
        let new_name = self
            .new_business_type_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        match (new_name, self.business_type_id) {
            (Some(name), _) => Ok(BusinessTypeChoice::New(name.to_string())),
            (None, Some(id)) => Ok(BusinessTypeChoice::Existing(id)),
            (None, None) => Err(AppError::validation("Business type is required")),
        }
    }
}

/// Template file received from a client.
#[derive(Clone)]
pub struct TemplateUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for TemplateUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl TemplateUpload {
    /// Check an owner's upload: a PDF or an image for the admins to convert.
    pub fn ensure_owner_upload(&self) -> AppResult<()> {
        self.ensure_not_empty()?;
        if !TEMPLATE_CONTENT_TYPES.contains(&self.content_type.as_str()) {
            return Err(AppError::validation(
                "Please select a valid PDF or Image (JPG, PNG) file.",
            ));
        }
        Ok(())
    }

    /// Check an admin's processed template, which must be a PDF.
    pub fn ensure_processed_upload(&self) -> AppResult<()> {
        self.ensure_not_empty()?;
        if self.content_type != CONTENT_TYPE_PDF {
            return Err(AppError::validation(
                "Please upload the processed PDF template for this business.",
            ));
        }
        Ok(())
    }

    fn ensure_not_empty(&self) -> AppResult<()> {
        if self.bytes.is_empty() {
            return Err(AppError::validation("Template file is empty"));
        }
        Ok(())
    }
}

/// Backend answer to a template upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateUploadResult {
    #[serde(default)]
    pub template_status: TemplateStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Raw template document fetched from the backend
#[derive(Debug, Clone)]
pub struct TemplateFile {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Admin view of businesses awaiting template work.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TemplateQueue {
    /// Pending templates across all businesses, before filtering
    pub pending_count: usize,
    pub businesses: Vec<Business>,
}

impl TemplateQueue {
    /// Filter to pending businesses unless `show_all`, apply a case-insensitive
    /// name or id search, then order pending, missing, active.
    pub fn build(all: Vec<Business>, show_all: bool, search: Option<&str>) -> Self {
        let pending_count = all
            .iter()
            .filter(|b| b.template_status == TemplateStatus::Pending)
            .count();

        let search = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut businesses: Vec<Business> = all
            .into_iter()
            .filter(|b| show_all || b.template_status == TemplateStatus::Pending)
            .filter(|b| match &search {
                Some(needle) => {
                    b.business_name.to_lowercase().contains(needle.as_str())
                        || b.business_id.to_string().contains(needle.as_str())
                }
                None => true,
            })
            .collect();

        businesses.sort_by_key(|b| b.template_status.queue_rank());

        Self {
            pending_count,
            businesses,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn business(id: i64, name: &str, status: TemplateStatus) -> Business {
        Business {
            business_id: id,
            business_name: name.to_string(),
            business_type_id: 1,
            user_id: 7,
            business_logo: None,
            business_address: None,
            business_city: None,
            business_state: None,
            business_country: None,
            business_zip: None,
            business_phone: None,
            business_email: None,
            business_website: None,
            is_active: true,
            template_status: status,
            created_on: None,
        }
    }

    #[test]
    fn test_template_status_parsing() {
        assert_eq!(TemplateStatus::from("ACTIVE"), TemplateStatus::Active);
        assert_eq!(TemplateStatus::from("pending"), TemplateStatus::Pending);
        assert_eq!(TemplateStatus::from("MISSING"), TemplateStatus::Missing);
        assert_eq!(TemplateStatus::from("archived"), TemplateStatus::Missing);
        assert_eq!(TemplateStatus::from(None), TemplateStatus::Missing);
    }

    #[test]
    fn test_business_deserializes_backend_record() {
        let json = r#"{
            "businessId": 5,
            "businessName": "Corner Bakery",
            "businessTypeId": 2,
            "userId": 9,
            "isActive": true,
            "templateStatus": "ACTIVE",
            "createdOn": "2024-03-01T10:00:00Z"
        }"#;

        let business: Business = serde_json::from_str(json).unwrap();
        assert_eq!(business.business_id, 5);
        assert_eq!(business.template_status, TemplateStatus::Active);
        assert!(business.created_on.is_some());
    }

    #[test]
    fn test_business_without_status_is_missing() {
        let json = r#"{"businessId": 1, "businessName": "A", "businessTypeId": 1,
                       "userId": 1, "templateStatus": null}"#;
        let business: Business = serde_json::from_str(json).unwrap();
        assert_eq!(business.template_status, TemplateStatus::Missing);

        let json = r#"{"businessId": 1, "businessName": "A", "businessTypeId": 1, "userId": 1}"#;
        let business: Business = serde_json::from_str(json).unwrap();
        assert_eq!(business.template_status, TemplateStatus::Missing);
    }

    #[test]
    fn test_type_choice() {
        let mut form: NewBusiness = serde_json::from_value(serde_json::json!({
            "businessName": "Corner Bakery",
            "businessAddress": "1 Main St",
            "businessCity": "Springfield",
            "businessState": "IL",
            "businessZip": "62701",
            "businessPhone": "555-0100",
            "businessEmail": "hello@example.com"
        }))
        .unwrap();

        assert!(form.type_choice().is_err());

        form.business_type_id = Some(4);
        assert_eq!(form.type_choice().unwrap(), BusinessTypeChoice::Existing(4));

        form.new_business_type_name = Some("  ".to_string());
        assert_eq!(form.type_choice().unwrap(), BusinessTypeChoice::Existing(4));

        form.new_business_type_name = Some("Catering".to_string());
        assert_eq!(
            form.type_choice().unwrap(),
            BusinessTypeChoice::New("Catering".to_string())
        );
    }

    #[test]
    fn test_new_business_type_name_not_forwarded() {
        let form: NewBusiness = serde_json::from_value(serde_json::json!({
            "businessName": "Corner Bakery",
            "businessTypeId": 4,
            "newBusinessTypeName": "ignored",
            "businessAddress": "1 Main St",
            "businessCity": "Springfield",
            "businessState": "IL",
            "businessZip": "62701",
            "businessPhone": "555-0100",
            "businessEmail": "hello@example.com",
            "userId": 3
        }))
        .unwrap();

        let wire = serde_json::to_value(&form).unwrap();
        assert!(wire.get("newBusinessTypeName").is_none());
        assert_eq!(wire["businessTypeId"], 4);
        assert_eq!(wire["userId"], 3);
    }

    #[test]
    fn test_owner_upload_accepts_pdf_and_images() {
        for content_type in ["application/pdf", "image/png", "image/jpeg"] {
            let upload = TemplateUpload {
                file_name: "t".to_string(),
                content_type: content_type.to_string(),
                bytes: vec![1, 2, 3],
            };
            assert!(upload.ensure_owner_upload().is_ok());
        }

        let gif = TemplateUpload {
            file_name: "t.gif".to_string(),
            content_type: "image/gif".to_string(),
            bytes: vec![1],
        };
        assert!(gif.ensure_owner_upload().is_err());
    }

    #[test]
    fn test_processed_upload_requires_pdf() {
        let png = TemplateUpload {
            file_name: "t.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1],
        };
        assert!(png.ensure_processed_upload().is_err());

        let empty = TemplateUpload {
            file_name: "t.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: vec![],
        };
        assert!(empty.ensure_processed_upload().is_err());
    }

    #[test]
    fn test_template_queue_pending_only_by_default() {
        let all = vec![
            business(1, "Alpha", TemplateStatus::Active),
            business(2, "Beta", TemplateStatus::Pending),
            business(3, "Gamma", TemplateStatus::Missing),
            business(4, "Delta", TemplateStatus::Pending),
        ];

        let queue = TemplateQueue::build(all, false, None);
        assert_eq!(queue.pending_count, 2);
        let ids: Vec<i64> = queue.businesses.iter().map(|b| b.business_id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_template_queue_show_all_sorted() {
        let all = vec![
            business(1, "Alpha", TemplateStatus::Active),
            business(2, "Beta", TemplateStatus::Missing),
            business(3, "Gamma", TemplateStatus::Pending),
        ];

        let queue = TemplateQueue::build(all, true, None);
        let ids: Vec<i64> = queue.businesses.iter().map(|b| b.business_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_template_queue_search_by_name_or_id() {
        let all = vec![
            business(12, "Corner Bakery", TemplateStatus::Active),
            business(30, "Bike Shop", TemplateStatus::Pending),
        ];

        let queue = TemplateQueue::build(all.clone(), true, Some("BAKERY"));
        assert_eq!(queue.businesses.len(), 1);
        assert_eq!(queue.businesses[0].business_id, 12);

        let queue = TemplateQueue::build(all, true, Some("30"));
        assert_eq!(queue.businesses.len(), 1);
        assert_eq!(queue.businesses[0].business_id, 30);
    }
}
