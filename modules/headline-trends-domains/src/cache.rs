use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use headline_trends_core::{HeadlineRecord, HeadlineSearch, LabeledCount, TrendsResult};

/// Reuses per-keyword monthly counts for a fixed TTL.
///
/// Only successful `monthly_counts` results are stored. Sample candidates always
/// go to the inner backend. A zero TTL turns the cache off.
pub struct CachedHeadlineSearch {
    inner: Arc<dyn HeadlineSearch>,
    ttl: Duration,
    entries: RwLock<HashMap<String, CachedCounts>>,
}

struct CachedCounts {
    stored_at: Instant,
    counts: Vec<LabeledCount>,
}

impl CachedHeadlineSearch {
    pub fn new(inner: Arc<dyn HeadlineSearch>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn lookup(&self, keyword: &str, now: Instant) -> Option<Vec<LabeledCount>> {
        let entries = self.entries.read().await;
        let entry = entries.get(keyword)?;
        (now.duration_since(entry.stored_at) < self.ttl).then(|| entry.counts.clone())
    }

    async fn store(&self, keyword: &str, counts: Vec<LabeledCount>, now: Instant) {
        let ttl = self.ttl;
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| now.duration_since(e.stored_at) < ttl);
        entries.insert(
            keyword.to_string(),
            CachedCounts {
                stored_at: now,
                counts,
            },
        );
    }
}

#[async_trait]
impl HeadlineSearch for CachedHeadlineSearch {
    async fn sample_candidates(
        &self,
        keyword: &str,
        year_month: &str,
    ) -> TrendsResult<Vec<HeadlineRecord>> {
        self.inner.sample_candidates(keyword, year_month).await
    }

    async fn monthly_counts(&self, keyword: &str) -> TrendsResult<Vec<LabeledCount>> {
        if self.ttl.is_zero() {
            return self.inner.monthly_counts(keyword).await;
        }

        if let Some(counts) = self.lookup(keyword, Instant::now()).await {
            debug!(keyword, "Cache hit for monthly counts");
            return Ok(counts);
        }

        debug!(keyword, "Cache miss for monthly counts, querying backend");
        let counts = self.inner.monthly_counts(keyword).await?;
        self.store(keyword, counts.clone(), Instant::now()).await;
        Ok(counts)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use headline_trends_core::testing::{headline, MockHeadlineSearch};

    fn mock() -> Arc<MockHeadlineSearch> {
        Arc::new(
            MockHeadlineSearch::new()
                .on_counts("storm", vec![LabeledCount::new("2020-01", 4)])
                .on_samples("storm", "2020-01", vec![headline("Storm Hits", 2020, 1, 3)])
                .failing("broken"),
        )
    }

    fn monthly_calls(mock: &MockHeadlineSearch) -> usize {
        mock.calls()
            .iter()
            .filter(|c| c.starts_with("monthly_counts:"))
            .count()
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_counts_hit_the_cache() {
        let inner = mock();
        let cache = CachedHeadlineSearch::new(inner.clone(), Duration::from_secs(3600));

        let first = cache.monthly_counts("storm").await.unwrap();
        let second = cache.monthly_counts("storm").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(monthly_calls(&inner), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let inner = mock();
        let cache = CachedHeadlineSearch::new(inner.clone(), Duration::from_secs(60));

        cache.monthly_counts("storm").await.unwrap();
        tokio::time::advance(Duration::from_secs(61)).await;
        cache.monthly_counts("storm").await.unwrap();

        assert_eq!(monthly_calls(&inner), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failures_are_not_cached() {
        let inner = mock();
        let cache = CachedHeadlineSearch::new(inner.clone(), Duration::from_secs(3600));

        assert!(cache.monthly_counts("broken").await.is_err());
        assert!(cache.monthly_counts("broken").await.is_err());

        assert_eq!(monthly_calls(&inner), 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_ttl_disables_caching() {
        let inner = mock();
        let cache = CachedHeadlineSearch::new(inner.clone(), Duration::ZERO);

        cache.monthly_counts("storm").await.unwrap();
        cache.monthly_counts("storm").await.unwrap();

        assert_eq!(monthly_calls(&inner), 2);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn samples_are_never_cached() {
        let inner = mock();
        let cache = CachedHeadlineSearch::new(inner.clone(), Duration::from_secs(3600));

        cache.sample_candidates("storm", "2020-01").await.unwrap();
        cache.sample_candidates("storm", "2020-01").await.unwrap();

        let sample_calls = inner
            .calls()
            .iter()
            .filter(|c| c.starts_with("sample_candidates:"))
            .count();
        assert_eq!(sample_calls, 2);
    }
}
