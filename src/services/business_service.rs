//! Business service - Businesses, categories and invoice templates.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use super::Viewer;
use crate::config::PATH_ADMIN_TEMPLATES;
use crate::domain::{
    Business, BusinessType, BusinessTypeChoice, Destination, NewBusiness, NewBusinessType,
    TemplateFile, TemplateUpload, TemplateUploadResult,
};
use crate::errors::AppResult;
use crate::infra::BackendClient;

/// A freshly created business and the page to continue on
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBusiness {
    pub business: Business,
    #[schema(example = "/upload-template/5")]
    pub next: String,
}

/// Whether a business has a stored template document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePresence {
    pub business_id: i64,
    pub exists: bool,
}

/// Business service trait for dependency injection.
#[async_trait]
pub trait BusinessService: Send + Sync {
    /// All businesses for admins, the viewer's own otherwise
    async fn list(&self, viewer: &Viewer) -> AppResult<Vec<Business>>;

    async fn get(&self, viewer: &Viewer, business_id: i64) -> AppResult<Business>;

    /// Create a business, creating its category first when a new one is named
    async fn create(&self, viewer: &Viewer, form: NewBusiness) -> AppResult<CreatedBusiness>;

    async fn types(&self, viewer: &Viewer) -> AppResult<Vec<BusinessType>>;

    async fn create_type(
        &self,
        viewer: &Viewer,
        business_type: NewBusinessType,
    ) -> AppResult<BusinessType>;

    async fn template_presence(
        &self,
        viewer: &Viewer,
        business_id: i64,
    ) -> AppResult<TemplatePresence>;

    async fn download_template(&self, viewer: &Viewer, business_id: i64)
        -> AppResult<TemplateFile>;

    /// Owner upload: PDF or an image for the admins to convert
    async fn upload_template(
        &self,
        viewer: &Viewer,
        business_id: i64,
        upload: TemplateUpload,
    ) -> AppResult<TemplateUploadResult>;
}

/// Concrete implementation of BusinessService backed by the invoice backend.
pub struct BusinessManager {
    backend: Arc<dyn BackendClient>,
}

impl BusinessManager {
    pub fn new(backend: Arc<dyn BackendClient>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl BusinessService for BusinessManager {
    async fn list(&self, viewer: &Viewer) -> AppResult<Vec<Business>> {
        let (token, user) = viewer.require_session()?;
        if viewer.role().is_admin() {
            self.backend.list_businesses(token).await
        } else {
            self.backend.user_businesses(token, user.user_id).await
        }
    }

    async fn get(&self, viewer: &Viewer, business_id: i64) -> AppResult<Business> {
        let (token, _) = viewer.require_session()?;
        self.backend.get_business(token, business_id).await
    }

    async fn create(&self, viewer: &Viewer, mut form: NewBusiness) -> AppResult<CreatedBusiness> {
        let (token, user) = viewer.require_session()?;

        if let BusinessTypeChoice::New(name) = form.type_choice()? {
            let created = self
                .backend
                .create_business_type(
                    token,
                    &NewBusinessType {
                        business_type_name: name,
                    },
                )
                .await?;
            form.business_type_id = Some(created.business_type_id);
            form.new_business_type_name = None;
        }
        form.user_id = Some(user.user_id);

        let business = self.backend.create_business(token, &form).await?;
        info!(business_id = business.business_id, user_id = user.user_id, "Business created");

        let next = if viewer.role().is_admin() {
            PATH_ADMIN_TEMPLATES.to_string()
        } else {
            Destination::UploadTemplate(business.business_id).path()
        };

        Ok(CreatedBusiness { business, next })
    }

    async fn types(&self, viewer: &Viewer) -> AppResult<Vec<BusinessType>> {
        let (token, _) = viewer.require_session()?;
        self.backend.business_types(token).await
    }

    async fn create_type(
        &self,
        viewer: &Viewer,
        business_type: NewBusinessType,
    ) -> AppResult<BusinessType> {
        let (token, _) = viewer.require_session()?;
        self.backend.create_business_type(token, &business_type).await
    }

    async fn template_presence(
        &self,
        viewer: &Viewer,
        business_id: i64,
    ) -> AppResult<TemplatePresence> {
        let (token, _) = viewer.require_session()?;
        let exists = self.backend.template_exists(token, business_id).await?;
        Ok(TemplatePresence {
            business_id,
            exists,
        })
    }

    async fn download_template(
        &self,
        viewer: &Viewer,
        business_id: i64,
    ) -> AppResult<TemplateFile> {
        let (token, _) = viewer.require_session()?;
        self.backend.fetch_template(token, business_id).await
    }

    async fn upload_template(
        &self,
        viewer: &Viewer,
        business_id: i64,
        upload: TemplateUpload,
    ) -> AppResult<TemplateUploadResult> {
        let (token, _) = viewer.require_session()?;
        upload.ensure_owner_upload()?;

        info!(business_id, upload = ?upload, "Uploading template");
        self.backend.upload_template(token, business_id, upload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::business::tests::business;
    use crate::domain::{TemplateStatus, UserSession};
    use crate::errors::AppError;
    use crate::infra::MockBackendClient;
    use mockall::predicate::{always, eq};

    fn manager(mock: MockBackendClient) -> BusinessManager {
        BusinessManager::new(Arc::new(mock))
    }

    fn owner() -> Viewer {
        Viewer::signed_in("token", UserSession::new(7, vec!["User".to_string()]))
    }

    fn admin() -> Viewer {
        Viewer::signed_in("token", UserSession::new(1, vec!["Admin".to_string()]))
    }

    fn form() -> NewBusiness {
        serde_json::from_value(serde_json::json!({
            "businessName": "Corner Bakery",
            "businessTypeId": 2,
            "businessAddress": "1 Main St",
            "businessCity": "Springfield",
            "businessState": "IL",
            "businessZip": "62701",
            "businessPhone": "555-0100",
            "businessEmail": "hello@cornerbakery.example"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_by_role() {
        let mut mock = MockBackendClient::new();
        mock.expect_list_businesses().times(1).returning(|_| {
            Ok(vec![
                business(1, "A", TemplateStatus::Active),
                business(2, "B", TemplateStatus::Missing),
            ])
        });
        mock.expect_user_businesses()
            .with(eq("token"), eq(7_i64))
            .times(1)
            .returning(|_, _| Ok(vec![business(2, "B", TemplateStatus::Missing)]));
        let service = manager(mock);

        assert_eq!(service.list(&admin()).await.unwrap().len(), 2);
        assert_eq!(service.list(&owner()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_requires_session() {
        let err = manager(MockBackendClient::new())
            .list(&Viewer::anonymous())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_create_with_existing_type() {
        let mut mock = MockBackendClient::new();
        mock.expect_create_business_type().never();
        mock.expect_create_business()
            .withf(|_, b| b.user_id == Some(7) && b.business_type_id == Some(2))
            .returning(|_, _| Ok(business(11, "Corner Bakery", TemplateStatus::Missing)));

        let created = manager(mock).create(&owner(), form()).await.unwrap();
        assert_eq!(created.business.business_id, 11);
        assert_eq!(created.next, "/upload-template/11");
    }

    #[tokio::test]
    async fn test_create_with_new_type() {
        let mut mock = MockBackendClient::new();
        mock.expect_create_business_type()
            .withf(|_, t| t.business_type_name == "Catering")
            .returning(|_, _| {
                Ok(BusinessType {
                    business_type_id: 9,
                    business_type_name: "Catering".to_string(),
                })
            });
        mock.expect_create_business()
            .withf(|_, b| b.business_type_id == Some(9) && b.new_business_type_name.is_none())
            .returning(|_, _| Ok(business(12, "Corner Bakery", TemplateStatus::Missing)));

        let mut form = form();
        form.new_business_type_name = Some(" Catering ".to_string());
        let created = manager(mock).create(&admin(), form).await.unwrap();
        assert_eq!(created.next, "/admin/templates");
    }

    #[tokio::test]
    async fn test_template_presence() {
        let mut mock = MockBackendClient::new();
        mock.expect_template_exists()
            .with(always(), eq(5_i64))
            .returning(|_, _| Ok(false));
        mock.expect_template_exists()
            .with(always(), eq(6_i64))
            .returning(|_, _| Ok(true));
        mock.expect_fetch_template().never();
        let service = manager(mock);

        assert!(!service.template_presence(&owner(), 5).await.unwrap().exists);
        assert!(service.template_presence(&owner(), 6).await.unwrap().exists);
    }

    #[tokio::test]
    async fn test_owner_upload_rejects_other_types() {
        let mut mock = MockBackendClient::new();
        mock.expect_upload_template().never();

        let upload = TemplateUpload {
            file_name: "template.docx".to_string(),
            content_type: "application/msword".to_string(),
            bytes: vec![1, 2],
        };
        let err = manager(mock)
            .upload_template(&owner(), 5, upload)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_owner_upload_accepts_image() {
        let mut mock = MockBackendClient::new();
        mock.expect_upload_template()
            .withf(|_, id, upload| *id == 5 && upload.content_type == "image/png")
            .returning(|_, _, _| {
                Ok(TemplateUploadResult {
                    template_status: TemplateStatus::Pending,
                    message: None,
                })
            });

        let upload = TemplateUpload {
            file_name: "scan.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2],
        };
        let result = manager(mock)
            .upload_template(&owner(), 5, upload)
            .await
            .unwrap();
        assert_eq!(result.template_status, TemplateStatus::Pending);
    }
}
