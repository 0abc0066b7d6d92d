//! Invoice handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{amount_in_words, Invoice, InvoiceDraft};
use crate::errors::AppResult;
use crate::services::Viewer;
use crate::types::{FileResponse, NoContent};

/// Amount to spell out
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AmountRequest {
    #[schema(example = 1234.56)]
    #[param(example = 1234.56)]
    pub amount: f64,
}

/// Amount with its printed words
#[derive(Debug, Serialize, ToSchema)]
pub struct AmountWords {
    #[schema(example = 1234.56)]
    pub amount: f64,
    #[schema(example = "One Thousand Two Hundred Thirty Four and Fifty Six Cents Only")]
    pub words: String,
}

/// Invoice listing filter
#[derive(Debug, Deserialize, IntoParams)]
pub struct InvoiceQuery {
    /// Limit to one business
    pub business_id: Option<i64>,
}

/// Routes open to anyone
pub fn amount_routes() -> Router<AppState> {
    Router::new().route(
        "/amount-in-words",
        get(amount_words_query).post(amount_words_body),
    )
}

/// Routes requiring a session
pub fn invoice_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_invoices))
        .route("/generate", post(generate_invoice))
        .route("/:id", delete(delete_invoice))
}

fn spell(amount: f64) -> AppResult<Json<AmountWords>> {
    let words = amount_in_words(amount)?;
    Ok(Json(AmountWords { amount, words }))
}

/// Spell out an amount (query string)
#[utoipa::path(
    get,
    path = "/invoices/amount-in-words",
    tag = "Invoices",
    params(AmountRequest),
    responses(
        (status = 200, description = "Amount in words", body = AmountWords),
        (status = 400, description = "Negative, non-finite or too large amount")
    )
)]
pub async fn amount_words_query(Query(request): Query<AmountRequest>) -> AppResult<Json<AmountWords>> {
    spell(request.amount)
}

/// Spell out an amount (JSON body)
#[utoipa::path(
    post,
    path = "/invoices/amount-in-words",
    tag = "Invoices",
    request_body = AmountRequest,
    responses(
        (status = 200, description = "Amount in words", body = AmountWords),
        (status = 400, description = "Negative, non-finite or too large amount")
    )
)]
pub async fn amount_words_body(Json(request): Json<AmountRequest>) -> AppResult<Json<AmountWords>> {
    spell(request.amount)
}

/// Render an invoice PDF
#[utoipa::path(
    post,
    path = "/invoices/generate",
    tag = "Invoices",
    request_body = InvoiceDraft,
    responses(
        (status = 200, description = "Invoice PDF", content_type = "application/pdf"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Business belongs to another user"),
        (status = 409, description = "Business has no template (TEMPLATE_MISSING)")
    ),
    security(("bearer_auth" = []))
)]
pub async fn generate_invoice(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    ValidatedJson(draft): ValidatedJson<InvoiceDraft>,
) -> AppResult<FileResponse> {
    let generated = state.invoice_service.generate(&viewer, draft).await?;
    Ok(FileResponse::pdf_attachment(generated.file_name, generated.bytes))
}

/// List invoices
#[utoipa::path(
    get,
    path = "/invoices",
    tag = "Invoices",
    params(InvoiceQuery),
    responses(
        (status = 200, description = "Invoices", body = Vec<Invoice>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_invoices(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Query(query): Query<InvoiceQuery>,
) -> AppResult<Json<Vec<Invoice>>> {
    let invoices = state
        .invoice_service
        .list(&viewer, query.business_id)
        .await?;
    Ok(Json(invoices))
}

/// Delete an invoice
#[utoipa::path(
    delete,
    path = "/invoices/{id}",
    tag = "Invoices",
    params(("id" = i64, Path, description = "Invoice ID")),
    responses(
        (status = 204, description = "Invoice deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Invoice not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_invoice(
    State(state): State<AppState>,
    Extension(viewer): Extension<Viewer>,
    Path(id): Path<i64>,
) -> AppResult<NoContent> {
    state.invoice_service.delete(&viewer, id).await?;
    Ok(NoContent)
}
