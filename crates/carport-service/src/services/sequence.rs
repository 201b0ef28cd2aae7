//! Sequence allocation service
//!
//! Turns the per-partition daily counter into formatted document numbers.

use chrono::NaiveDate;
use tracing::instrument;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Width of the zero-padded ordinal in a document number
const SEQ_WIDTH: usize = 3;

/// Sequence service
pub struct SequenceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SequenceService<'a> {
    /// Create a new SequenceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Normalize and validate a partition code
    ///
    /// Codes are 2-3 ASCII letters and stored uppercase. This is the single
    /// place partition input is shaped; callers persist exactly what it
    /// returns.
    pub fn normalize_partition(code: &str) -> ServiceResult<String> {
        let code = code.trim().to_ascii_uppercase();
        if !(2..=3).contains(&code.len()) || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ServiceError::validation(
                "Partition code must be 2-3 ASCII letters",
            ));
        }
        Ok(code)
    }

    /// Allocate the next document number for a partition and day
    ///
    /// Numbers look like `RU-20250101001`: partition code, date, then the
    /// daily ordinal zero-padded to three digits (wider once past 999). The
    /// counter reservation is atomic, so concurrent callers always receive
    /// distinct ordinals.
    #[instrument(skip(self))]
    pub async fn next_number(
        &self,
        partition_code: &str,
        date: NaiveDate,
    ) -> ServiceResult<String> {
        let code = Self::normalize_partition(partition_code)?;
        let seq = self.ctx.sequence_repo().reserve_next(&code, date).await?;

        Ok(format!(
            "{}-{}{:0width$}",
            code,
            date.format("%Y%m%d"),
            seq,
            width = SEQ_WIDTH
        ))
    }
}
