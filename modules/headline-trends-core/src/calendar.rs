//! Calendar-month arithmetic.
//!
//! Months are handled as `year * 12 + month` indices so distances are exact
//! integers regardless of how many days each month has.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{TrendsError, TrendsResult};

/// A calendar year and month with no day component. Serialized as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns `None` unless `month` is in `1..=12` and `year` fits in four digits.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Parse a strict `YYYY-MM` label.
    pub fn parse(label: &str) -> TrendsResult<Self> {
        let format_error = || TrendsError::Format {
            label: label.to_string(),
        };

        let bytes = label.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(format_error());
        }
        let (year, month) = (&label[..4], &label[5..]);
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(format_error());
        }

        let year: i32 = year.parse().map_err(|_| format_error())?;
        let month: u32 = month.parse().map_err(|_| format_error())?;
        Self::new(year, month).ok_or_else(format_error)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    fn index(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month)
    }

    /// The following calendar month, rolling December over into January.
    pub fn successor(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Signed number of calendar months from `a` to `b`. Negative when `a` is later.
    pub fn months_between(a: &Self, b: &Self) -> i64 {
        b.index() - a.index()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = TrendsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::parse(&label).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(label: &str) -> YearMonth {
        YearMonth::parse(label).unwrap()
    }

    #[test]
    fn parses_and_displays_canonical_label() {
        let m = ym("2020-03");
        assert_eq!(m.year(), 2020);
        assert_eq!(m.month(), 3);
        assert_eq!(m.to_string(), "2020-03");
    }

    #[test]
    fn rejects_malformed_labels() {
        for label in [
            "", "2020", "2020-1", "2020-001", "2020/01", "20-01-01", "2020-13", "2020-00",
            "abcd-01", "2020-0a", "+202-01", "2020-01-15",
        ] {
            assert!(
                matches!(YearMonth::parse(label), Err(TrendsError::Format { .. })),
                "expected format error for {label:?}"
            );
        }
    }

    #[test]
    fn successor_within_year() {
        assert_eq!(ym("2021-06").successor(), ym("2021-07"));
    }

    #[test]
    fn successor_rolls_over_december() {
        assert_eq!(ym("2020-12").successor(), ym("2021-01"));
    }

    #[test]
    fn months_between_is_exact() {
        assert_eq!(YearMonth::months_between(&ym("2020-01"), &ym("2020-01")), 0);
        assert_eq!(YearMonth::months_between(&ym("2020-01"), &ym("2020-02")), 1);
        // January 31 days, February 28: a day-based estimate would misjudge this
        assert_eq!(YearMonth::months_between(&ym("2021-01"), &ym("2021-03")), 2);
        assert_eq!(YearMonth::months_between(&ym("2020-11"), &ym("2021-02")), 3);
        assert_eq!(YearMonth::months_between(&ym("1999-12"), &ym("2000-01")), 1);
    }

    #[test]
    fn months_between_is_negative_when_reversed() {
        assert_eq!(YearMonth::months_between(&ym("2021-02"), &ym("2020-11")), -3);
    }

    #[test]
    fn ordering_is_by_year_then_month() {
        assert!(ym("2019-12") < ym("2020-01"));
        assert!(ym("2020-02") < ym("2020-10"));
    }

    #[test]
    fn serde_uses_label_form() {
        let json = serde_json::to_string(&ym("2008-09")).unwrap();
        assert_eq!(json, "\"2008-09\"");
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym("2008-09"));
        assert!(serde_json::from_str::<YearMonth>("\"2008-9\"").is_err());
    }
}
