//! PostgreSQL implementation of InvoiceRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use carport_core::entities::Invoice;
use carport_core::error::DomainError;
use carport_core::traits::{InvoiceQuery, InvoiceRepository, RepoResult};

use crate::models::InvoiceModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of InvoiceRepository
#[derive(Clone)]
pub struct PgInvoiceRepository {
    pool: PgPool,
}

impl PgInvoiceRepository {
    /// Create a new PgInvoiceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvoiceRepository for PgInvoiceRepository {
    #[instrument(skip(self, invoice))]
    async fn create(&self, invoice: &Invoice) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO invoices (id, number, country_code, customer_name, amount_cents, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(invoice.id)
        .bind(&invoice.number)
        .bind(&invoice.country_code)
        .bind(&invoice.customer_name)
        .bind(invoice.amount_cents)
        .bind(invoice.created_by)
        .bind(invoice.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateNumber(invoice.number.clone())))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Invoice>> {
        let result = sqlx::query_as::<_, InvoiceModel>(
            r"
            SELECT id, number, country_code, customer_name, amount_cents, created_by, created_at
            FROM invoices
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Invoice::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: InvoiceQuery) -> RepoResult<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, InvoiceModel>(
            r"
            SELECT id, number, country_code, customer_name, amount_cents, created_by, created_at
            FROM invoices
            ORDER BY created_at DESC
            LIMIT $1
            ",
        )
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Invoice::from).collect())
    }
}
