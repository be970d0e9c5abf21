use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;

/// One headline as stored by the search backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineRecord {
    pub headline: String,
    pub web_url: String,
    /// Serialized as `YYYY-MM-DD`.
    pub pub_date: NaiveDate,
}

/// A backend count row whose month label has not been validated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledCount {
    pub year_month: String,
    pub count: u64,
}

impl LabeledCount {
    pub fn new(year_month: impl Into<String>, count: u64) -> Self {
        Self {
            year_month: year_month.into(),
            count,
        }
    }
}

/// Number of matching headlines in one month. Wire form is `{x, y}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    #[serde(rename = "x")]
    pub month: YearMonth,
    #[serde(rename = "y")]
    pub count: u64,
}

impl MonthlyCount {
    pub fn new(month: YearMonth, count: u64) -> Self {
        Self { month, count }
    }

    pub fn zero(month: YearMonth) -> Self {
        Self { month, count: 0 }
    }
}

/// Contiguous per-month counts for one keyword. Wire form is `{id, data}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceSeries {
    #[serde(rename = "id")]
    pub keyword: String,
    #[serde(rename = "data")]
    pub points: Vec<MonthlyCount>,
}

impl OccurrenceSeries {
    /// True when every adjacent pair of points is exactly one month apart.
    pub fn is_contiguous(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| YearMonth::months_between(&w[0].month, &w[1].month) == 1)
    }
}

/// Random headline sample for a keyword within one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSet {
    pub keyword: String,
    pub year_month: String,
    pub items: Vec<HeadlineRecord>,
}
