//! Invoice database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for invoices table
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceModel {
    pub id: Uuid,
    pub number: String,
    pub country_code: String,
    pub customer_name: String,
    pub amount_cents: i64,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}
