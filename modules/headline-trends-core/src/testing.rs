// In-memory HeadlineSearch for tests.
//
// Unregistered keywords have no matches. Failures and per-keyword delays are
// opt-in through the builder, and every call is recorded.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::{TrendsError, TrendsResult};
use crate::search::HeadlineSearch;
use crate::types::{HeadlineRecord, LabeledCount};

#[derive(Default)]
pub struct MockHeadlineSearch {
    counts: HashMap<String, Vec<LabeledCount>>,
    samples: HashMap<(String, String), Vec<HeadlineRecord>>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl MockHeadlineSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_counts(mut self, keyword: &str, counts: Vec<LabeledCount>) -> Self {
        self.counts.insert(keyword.to_string(), counts);
        self
    }

    pub fn on_samples(mut self, keyword: &str, year_month: &str, records: Vec<HeadlineRecord>) -> Self {
        self.samples
            .insert((keyword.to_string(), year_month.to_string()), records);
        self
    }

    /// Every call for `keyword` returns a backend error.
    pub fn failing(mut self, keyword: &str) -> Self {
        self.failing.insert(keyword.to_string());
        self
    }

    /// Every call for `keyword` sleeps before answering.
    pub fn with_delay(mut self, keyword: &str, delay: Duration) -> Self {
        self.delays.insert(keyword.to_string(), delay);
        self
    }

    /// Calls received so far, as `method:args`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    async fn enter(&self, call: String, keyword: &str) -> TrendsResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if let Some(delay) = self.delays.get(keyword) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(keyword) {
            return Err(TrendsError::backend(anyhow::anyhow!(
                "mock backend failure for {keyword:?}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl HeadlineSearch for MockHeadlineSearch {
    async fn sample_candidates(
        &self,
        keyword: &str,
        year_month: &str,
    ) -> TrendsResult<Vec<HeadlineRecord>> {
        self.enter(format!("sample_candidates:{keyword}:{year_month}"), keyword)
            .await?;
        Ok(self
            .samples
            .get(&(keyword.to_string(), year_month.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn monthly_counts(&self, keyword: &str) -> TrendsResult<Vec<LabeledCount>> {
        self.enter(format!("monthly_counts:{keyword}"), keyword).await?;
        Ok(self.counts.get(keyword).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A headline record with a placeholder URL.
pub fn headline(text: &str, year: i32, month: u32, day: u32) -> HeadlineRecord {
    HeadlineRecord {
        headline: text.to_string(),
        web_url: format!("https://www.nytimes.com/{year}/{month:02}/{day:02}/{}.html", slug(text)),
        pub_date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
    }
}

fn slug(text: &str) -> String {
    text.to_lowercase().replace(' ', "-")
}
