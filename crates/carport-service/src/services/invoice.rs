//! Invoice service
//!
//! Document creation consumes the sequence allocator; reads are plain
//! repository queries.

use carport_core::entities::Invoice;
use carport_core::{DomainError, InvoiceQuery};
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{CreateInvoiceRequest, InvoiceListQuery, InvoiceResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::sequence::SequenceService;

const DEFAULT_LIST_LIMIT: i64 = 50;
const MAX_LIST_LIMIT: i64 = 100;

/// Invoice service
pub struct InvoiceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InvoiceService<'a> {
    /// Create a new InvoiceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an invoice with a freshly allocated document number
    ///
    /// A unique-number collision at persistence surfaces as a 409 conflict;
    /// the caller may retry.
    #[instrument(skip(self, request), fields(country_code = %request.country_code))]
    pub async fn create_invoice(
        &self,
        created_by: Uuid,
        request: CreateInvoiceRequest,
    ) -> ServiceResult<InvoiceResponse> {
        let code = SequenceService::normalize_partition(&request.country_code)?;
        let number = SequenceService::new(self.ctx)
            .next_number(&code, Utc::now().date_naive())
            .await?;

        let invoice = Invoice::new(
            number,
            code,
            request.customer_name,
            request.amount_cents,
            created_by,
        );
        self.ctx.invoice_repo().create(&invoice).await?;

        info!(invoice_id = %invoice.id, number = %invoice.number, "Invoice created");

        Ok(InvoiceResponse::from(&invoice))
    }

    /// List invoices, newest first
    #[instrument(skip(self))]
    pub async fn list_invoices(
        &self,
        query: InvoiceListQuery,
    ) -> ServiceResult<Vec<InvoiceResponse>> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);

        let invoices = self.ctx.invoice_repo().list(InvoiceQuery { limit }).await?;
        Ok(invoices.iter().map(InvoiceResponse::from).collect())
    }

    /// Get invoice by ID
    #[instrument(skip(self))]
    pub async fn get_invoice(&self, invoice_id: Uuid) -> ServiceResult<InvoiceResponse> {
        let invoice = self
            .ctx
            .invoice_repo()
            .find_by_id(invoice_id)
            .await?
            .ok_or(DomainError::InvoiceNotFound(invoice_id))?;

        Ok(InvoiceResponse::from(&invoice))
    }
}
