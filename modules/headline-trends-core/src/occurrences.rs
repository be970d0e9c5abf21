//! Occurrence series for a list of keywords.

use futures::future::try_join_all;
use tracing::debug;

use crate::error::{TrendsError, TrendsResult};
use crate::gap_fill::gap_fill;
use crate::search::HeadlineSearch;
use crate::types::OccurrenceSeries;

/// Split a comma-separated `keywords` parameter, keeping order, duplicates and
/// empty entries.
pub fn parse_keywords(raw: Option<&str>) -> TrendsResult<Vec<String>> {
    match raw {
        Some(raw) if !raw.is_empty() => Ok(raw.split(',').map(str::to_string).collect()),
        _ => Err(TrendsError::MissingParameter("keywords")),
    }
}

/// Build one gap-filled series per keyword, in the order the keywords were given.
///
/// Backend calls run concurrently. If any keyword fails the whole call fails
/// and no series are returned.
pub async fn build_occurrence_series(
    search: &dyn HeadlineSearch,
    keywords: &[String],
) -> TrendsResult<Vec<OccurrenceSeries>> {
    try_join_all(keywords.iter().map(|keyword| series_for(search, keyword))).await
}

async fn series_for(search: &dyn HeadlineSearch, keyword: &str) -> TrendsResult<OccurrenceSeries> {
    let counts = search.monthly_counts(keyword).await?;
    let points = gap_fill(&counts)?;

    debug!(
        keyword,
        backend_months = counts.len(),
        filled_months = points.len(),
        "Built occurrence series"
    );

    Ok(OccurrenceSeries {
        keyword: keyword.to_string(),
        points,
    })
}
