use axum::{
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::CONTENT_TYPE_PDF;

/// Message-only response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Password reset instructions sent")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Created response helper (common pattern for POST endpoints)
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// No content response helper (common pattern for DELETE endpoints)
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}

/// Binary document response
pub struct FileResponse {
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// Sent as an attachment under this name when set
    pub file_name: Option<String>,
}

impl FileResponse {
    /// PDF offered for download as `file_name`
    pub fn pdf_attachment(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            content_type: CONTENT_TYPE_PDF.to_string(),
            bytes,
            file_name: Some(file_name.into()),
        }
    }

    /// Document shown inline
    pub fn inline(content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes,
            file_name: None,
        }
    }
}

impl IntoResponse for FileResponse {
    fn into_response(self) -> Response {
        let content_type = HeaderValue::from_str(&self.content_type)
            .unwrap_or(HeaderValue::from_static("application/octet-stream"));
        let mut response = (StatusCode::OK, [(CONTENT_TYPE, content_type)], self.bytes).into_response();

        if let Some(name) = self.file_name {
            let disposition = format!("attachment; filename=\"{}\"", name.replace('"', ""));
            if let Ok(value) = HeaderValue::from_str(&disposition) {
                response.headers_mut().insert(CONTENT_DISPOSITION, value);
            }
        }
        response
    }
}
