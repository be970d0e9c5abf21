//! Dense monthly series from sparse backend counts.

use crate::calendar::YearMonth;
use crate::error::TrendsResult;
use crate::types::{LabeledCount, MonthlyCount};

/// Expand an ascending, sparse list of monthly counts into a contiguous series.
///
/// Every month strictly between two consecutive input months gets a zero-count
/// entry. Input entries are kept unchanged and in their original order, so the
/// series spans exactly `[first.month, last.month]`. A repeated or descending
/// month has no months between it and its predecessor and is appended as-is.
///
/// Fails with [`TrendsError::Format`](crate::TrendsError::Format) on the first
/// label that is not `YYYY-MM`.
pub fn gap_fill(rows: &[LabeledCount]) -> TrendsResult<Vec<MonthlyCount>> {
    let mut rows = rows.iter();
    let Some(first) = rows.next() else {
        return Ok(Vec::new());
    };

    let mut prev = YearMonth::parse(&first.year_month)?;
    let mut filled = vec![MonthlyCount::new(prev, first.count)];

    for row in rows {
        let month = YearMonth::parse(&row.year_month)?;

        let mut gap = prev.successor();
        for _ in 1..YearMonth::months_between(&prev, &month) {
            filled.push(MonthlyCount::zero(gap));
            gap = gap.successor();
        }

        filled.push(MonthlyCount::new(month, row.count));
        prev = month;
    }

    Ok(filled)
}
