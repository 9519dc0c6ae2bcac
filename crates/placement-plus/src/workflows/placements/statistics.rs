//! Placement statistics aggregation.
//!
//! Aggregates are maintained incrementally: the average folds the new offer
//! into the previous mean, the maximum is a single comparison, and only the
//! median pays for a re-sort of the branch's recorded offers. Branch cohorts
//! are small, so the per-insert sort stays acceptable; the median tie-break
//! (mean of the two middle elements on even counts) is load-bearing and must
//! not change if the ordering structure ever does.

use super::domain::{Branch, BranchStatistics, CompensationRecord, Month};

/// Validation failures raised before any aggregate is touched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatisticsError {
    #[error("compensation must be a positive LPA figure, got {ctc_lpa}")]
    NonPositiveCompensation { ctc_lpa: f64 },
    #[error("statistics for {} cannot absorb an offer for {}", expected.label(), actual.label())]
    BranchMismatch { expected: Branch, actual: Branch },
}

/// Fold one full-time offer into a branch's statistics.
///
/// `existing` is `None` the first time a branch places a student; that base
/// case seeds every aggregate from the single offer. The call is not
/// idempotent: each invocation represents a distinct placement event and
/// appends its own [`CompensationRecord`].
pub fn record_offer(
    existing: Option<BranchStatistics>,
    branch: Branch,
    ctc_lpa: f64,
    month: Month,
) -> Result<BranchStatistics, StatisticsError> {
    if !(ctc_lpa.is_finite() && ctc_lpa > 0.0) {
        return Err(StatisticsError::NonPositiveCompensation { ctc_lpa });
    }

    let record = CompensationRecord { ctc_lpa, month };

    let Some(mut stats) = existing else {
        return Ok(BranchStatistics {
            branch,
            avg_package: ctc_lpa,
            median_package: ctc_lpa,
            max_package: ctc_lpa,
            total_students: 0,
            placed_students: 1,
            ctc_values: vec![record],
            version: 0,
        });
    };

    if stats.branch != branch {
        return Err(StatisticsError::BranchMismatch {
            expected: stats.branch,
            actual: branch,
        });
    }

    let old_count = stats.placed_students as f64;

    stats.ctc_values.push(record);
    // Stable sort: equal CTCs keep insertion order, which is all the median
    // rank positions need.
    stats
        .ctc_values
        .sort_by(|a, b| a.ctc_lpa.total_cmp(&b.ctc_lpa));

    stats.median_package = median(&stats.ctc_values);
    stats.avg_package = (stats.avg_package * old_count + ctc_lpa) / (old_count + 1.0);
    stats.max_package = stats.max_package.max(ctc_lpa);
    stats.placed_students += 1;

    Ok(stats)
}

/// Median of an ascending-sorted slice: middle element for odd counts, mean of
/// the two middle elements for even counts.
fn median(sorted: &[CompensationRecord]) -> f64 {
    let n = sorted.len();
    let mid = n / 2;
    if n % 2 == 1 {
        sorted[mid].ctc_lpa
    } else {
        (sorted[mid - 1].ctc_lpa + sorted[mid].ctc_lpa) / 2.0
    }
}
