use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use headline_trends_core::{HeadlineRecord, HeadlineSearch, LabeledCount, TrendsError, TrendsResult};

const SAMPLE_CANDIDATES_QUERY: &str = r#"
    SELECT
        headline,
        web_url,
        CAST(CAST(pub_date AS timestamp) AS date) AS pub_date
    FROM headlines
    WHERE textsearchable_index_col @@ to_tsquery('simple', $1)
      AND year_month = $2
"#;

const MONTHLY_COUNTS_QUERY: &str = r#"
    SELECT
        year_month,
        COUNT(headline) AS num_headlines
    FROM headlines
    WHERE textsearchable_index_col @@ to_tsquery('simple', $1)
    GROUP BY year_month
    ORDER BY year_month
"#;

#[derive(Debug, sqlx::FromRow)]
struct HeadlineRow {
    headline: String,
    web_url: String,
    pub_date: NaiveDate,
}

#[derive(Debug, sqlx::FromRow)]
struct MonthlyCountRow {
    year_month: String,
    num_headlines: i64,
}

/// Postgres full-text search over the `headlines` table.
///
/// Each call checks a connection out of the pool for the one query it runs;
/// the connection goes back when the call returns, on success or error.
#[derive(Clone)]
pub struct PgHeadlineSearch {
    pool: PgPool,
}

impl PgHeadlineSearch {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HeadlineSearch for PgHeadlineSearch {
    async fn sample_candidates(
        &self,
        keyword: &str,
        year_month: &str,
    ) -> TrendsResult<Vec<HeadlineRecord>> {
        let mut conn = self.pool.acquire().await.map_err(TrendsError::backend)?;

        let rows = sqlx::query_as::<_, HeadlineRow>(SAMPLE_CANDIDATES_QUERY)
            .bind(keyword)
            .bind(year_month)
            .fetch_all(&mut *conn)
            .await
            .map_err(TrendsError::backend)?;

        Ok(rows
            .into_iter()
            .map(|r| HeadlineRecord {
                headline: r.headline,
                web_url: r.web_url,
                pub_date: r.pub_date,
            })
            .collect())
    }

    async fn monthly_counts(&self, keyword: &str) -> TrendsResult<Vec<LabeledCount>> {
        let mut conn = self.pool.acquire().await.map_err(TrendsError::backend)?;

        let rows = sqlx::query_as::<_, MonthlyCountRow>(MONTHLY_COUNTS_QUERY)
            .bind(keyword)
            .fetch_all(&mut *conn)
            .await
            .map_err(TrendsError::backend)?;

        rows.into_iter()
            .map(|r| {
                let count = u64::try_from(r.num_headlines).map_err(|_| {
                    TrendsError::backend(anyhow::anyhow!(
                        "negative headline count {} for {}",
                        r.num_headlines,
                        r.year_month
                    ))
                })?;
                Ok(LabeledCount::new(r.year_month, count))
            })
            .collect()
    }

    fn name(&self) -> &str {
        "postgres"
    }
}
