//! Raw template body extractor.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};

use crate::config::{DEFAULT_TEMPLATE_FILE_NAME, FILE_NAME_HEADER};
use crate::domain::TemplateUpload;
use crate::errors::AppError;

/// Template document sent as the raw request body.
///
/// The content type comes from `Content-Type` (parameters dropped), the file
/// name from `X-File-Name`.
pub struct RawTemplate(pub TemplateUpload);

#[async_trait]
impl<S> FromRequest<S> for RawTemplate
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let headers = req.headers();
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::bad_request("Content-Type header is required"))?;
        let file_name = headers
            .get(FILE_NAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_TEMPLATE_FILE_NAME)
            .to_string();

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        Ok(RawTemplate(TemplateUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }))
    }
}
