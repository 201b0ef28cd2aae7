//! Invoice entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Export invoice document
///
/// `number` comes from the per-partition daily sequence and is unique across
/// the whole table, not just within a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub id: Uuid,
    pub number: String,
    pub country_code: String,
    pub customer_name: String,
    pub amount_cents: i64,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    pub fn new(
        number: String,
        country_code: String,
        customer_name: String,
        amount_cents: i64,
        created_by: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            number,
            country_code,
            customer_name,
            amount_cents,
            created_by,
            created_at: Utc::now(),
        }
    }
}
