//! Invoice handlers
//!
//! Endpoints for creating and reading invoices with allocated document numbers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use carport_core::UserRole;
use carport_service::{CreateInvoiceRequest, InvoiceListQuery, InvoiceResponse, InvoiceService};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Create an invoice
///
/// POST /invoices
pub async fn create_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateInvoiceRequest>,
) -> ApiResult<Created<Json<InvoiceResponse>>> {
    auth.require_any(&[UserRole::SuperAdmin, UserRole::Admin, UserRole::Sales])?;

    let service = InvoiceService::new(state.service_context());
    let response = service.create_invoice(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// List invoices, newest first
///
/// GET /invoices
pub async fn list_invoices(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<InvoiceListQuery>,
) -> ApiResult<Json<Vec<InvoiceResponse>>> {
    let service = InvoiceService::new(state.service_context());
    let invoices = service.list_invoices(query).await?;
    Ok(Json(invoices))
}

/// Get an invoice by ID
///
/// GET /invoices/{invoice_id}
pub async fn get_invoice(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(invoice_id): Path<String>,
) -> ApiResult<Json<InvoiceResponse>> {
    let invoice_id = invoice_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid invoice_id format"))?;

    let service = InvoiceService::new(state.service_context());
    let response = service.get_invoice(invoice_id).await?;
    Ok(Json(response))
}
