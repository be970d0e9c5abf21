use async_trait::async_trait;

use crate::error::TrendsResult;
use crate::types::{HeadlineRecord, LabeledCount};

/// Read access to the full-text indexed headline corpus.
///
/// Implementations own their connection handling. Callers hold the backend as
/// an explicitly passed `Arc<dyn HeadlineSearch>`.
#[async_trait]
pub trait HeadlineSearch: Send + Sync {
    /// Every headline matching `keyword` published in the month labeled `year_month`.
    async fn sample_candidates(
        &self,
        keyword: &str,
        year_month: &str,
    ) -> TrendsResult<Vec<HeadlineRecord>>;

    /// Per-month match counts for `keyword`, ascending by month.
    /// Months without a match are omitted.
    async fn monthly_counts(&self, keyword: &str) -> TrendsResult<Vec<LabeledCount>>;

    /// Backend name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
