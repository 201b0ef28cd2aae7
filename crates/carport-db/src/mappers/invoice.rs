//! Invoice entity <-> model mapper

use carport_core::entities::Invoice;

use crate::models::InvoiceModel;

/// Convert InvoiceModel to Invoice entity
impl From<InvoiceModel> for Invoice {
    fn from(model: InvoiceModel) -> Self {
        Invoice {
            id: model.id,
            number: model.number,
            country_code: model.country_code,
            customer_name: model.customer_name,
            amount_cents: model.amount_cents,
            created_by: model.created_by,
            created_at: model.created_at,
        }
    }
}
