//! PostgreSQL implementation of SequenceRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use carport_core::traits::{RepoResult, SequenceRepository};

use super::error::map_db_error;

/// PostgreSQL implementation of SequenceRepository
///
/// Counter state lives in the `sequence_counters` table keyed by
/// (partition_code, day). A single upsert both creates the row on first use
/// and increments it afterwards, so concurrent callers serialize on the row
/// lock and each sees a distinct value.
#[derive(Clone)]
pub struct PgSequenceRepository {
    pool: PgPool,
}

impl PgSequenceRepository {
    /// Create a new PgSequenceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SequenceRepository for PgSequenceRepository {
    #[instrument(skip(self))]
    async fn reserve_next(&self, partition_code: &str, day: NaiveDate) -> RepoResult<i64> {
        let counter = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO sequence_counters (partition_code, day, counter)
            VALUES ($1, $2, 1)
            ON CONFLICT (partition_code, day)
            DO UPDATE SET counter = sequence_counters.counter + 1
            RETURNING counter
            ",
        )
        .bind(partition_code)
        .bind(day)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(counter)
    }
}
