//! Business and template handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Extension, Router,
};

use crate::api::extractors::{RawTemplate, ValidatedJson};
use crate::api::AppState;
use crate::domain::{Business, BusinessType, NewBusiness, NewBusinessType, TemplateUploadResult};
use crate::errors::AppResult;
use crate::services::{CreatedBusiness, TemplatePresence, Viewer};
use crate::types::{Created, FileResponse};

/// Create business routes (session required)
pub fn business_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_businesses).post(create_business))
        .route("/types", get(list_types).post(create_type))
        .route("/:id", get(get_business))
        .route("/:id/template", get(download_template).post(upload_template))
        .route("/:id/template/status", get(template_status))
}

/// List businesses
#[utoipa::path(
    get,
    path = "/businesses",
    tag = "Businesses",
    responses(
        (status = 200, description = "All businesses for admins, own businesses otherwise", body = Vec<Business>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_businesses(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> AppResult<Json<Vec<Business>>> {
    Ok(Json(state.business_service.list(&viewer).await?))
}

/// Create a business
#[utoipa::path(
    post,
    path = "/businesses",
    tag = "Businesses",
    request_body = NewBusiness,
    responses(
        (status = 201, description = "Business created", body = CreatedBusiness),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_business(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    ValidatedJson(form): ValidatedJson<NewBusiness>,
) -> AppResult<Created<CreatedBusiness>> {
    let created = state.business_service.create(&viewer, form).await?;
    Ok(Created(created))
}

/// Get a business
#[utoipa::path(
    get,
    path = "/businesses/{id}",
    tag = "Businesses",
    params(("id" = i64, Path, description = "Business ID")),
    responses(
        (status = 200, description = "Business", body = Business),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Business not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_business(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i64>,
) -> AppResult<Json<Business>> {
    Ok(Json(state.business_service.get(&viewer, id).await?))
}

/// List business categories
#[utoipa::path(
    get,
    path = "/businesses/types",
    tag = "Businesses",
    responses(
        (status = 200, description = "Business categories", body = Vec<BusinessType>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_types(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
) -> AppResult<Json<Vec<BusinessType>>> {
    Ok(Json(state.business_service.types(&viewer).await?))
}

/// Create a business category
#[utoipa::path(
    post,
    path = "/businesses/types",
    tag = "Businesses",
    request_body = NewBusinessType,
    responses(
        (status = 201, description = "Category created", body = BusinessType),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_type(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    ValidatedJson(business_type): ValidatedJson<NewBusinessType>,
) -> AppResult<Created<BusinessType>> {
    let created = state
        .business_service
        .create_type(&viewer, business_type)
        .await?;
    Ok(Created(created))
}

/// Download the stored template
#[utoipa::path(
    get,
    path = "/businesses/{id}/template",
    tag = "Templates",
    params(("id" = i64, Path, description = "Business ID")),
    responses(
        (status = 200, description = "Template document"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No template stored")
    ),
    security(("bearer_auth" = []))
)]
pub async fn download_template(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i64>,
) -> AppResult<FileResponse> {
    let file = state
        .business_service
        .download_template(&viewer, id)
        .await?;
    Ok(FileResponse::inline(file.content_type, file.bytes))
}

/// Check whether a template is stored
#[utoipa::path(
    get,
    path = "/businesses/{id}/template/status",
    tag = "Templates",
    params(("id" = i64, Path, description = "Business ID")),
    responses(
        (status = 200, description = "Template presence", body = TemplatePresence),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn template_status(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i64>,
) -> AppResult<Json<TemplatePresence>> {
    Ok(Json(
        state.business_service.template_presence(&viewer, id).await?,
    ))
}

/// Upload a template (PDF, JPEG or PNG as the raw body)
#[utoipa::path(
    post,
    path = "/businesses/{id}/template",
    tag = "Templates",
    params(
        ("id" = i64, Path, description = "Business ID"),
        ("x-file-name" = Option<String>, Header, description = "Original file name")
    ),
    request_body(content = Vec<u8>, content_type = "application/pdf", description = "Template document"),
    responses(
        (status = 200, description = "Template stored", body = TemplateUploadResult),
        (status = 400, description = "Unsupported or empty file"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_template(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i64>,
    RawTemplate(upload): RawTemplate,
) -> AppResult<Json<TemplateUploadResult>> {
    let result = state
        .business_service
        .upload_template(&viewer, id, upload)
        .await?;
    Ok(Json(result))
}
