//! Splits a vocabulary list into contiguous day buckets.
//!
//! The list is cut into `DAY_COUNT` chunks of `ceil(total / DAY_COUNT)` rows
//! each, in file order. The last non-empty chunk may be short and trailing
//! days may be empty.

use std::ops::Range;

use crate::model::{DAY_COUNT, Day};

/// Bucketing layout for a list of `total` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPlan {
    total: usize,
    per_day: usize,
}

/// Number of rows that land in each full day bucket.
#[must_use]
pub fn entries_per_day(total: usize) -> usize {
    total.div_ceil(usize::from(DAY_COUNT))
}

impl DayPlan {
    #[must_use]
    pub fn for_total(total: usize) -> Self {
        Self {
            total,
            per_day: entries_per_day(total),
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn per_day(&self) -> usize {
        self.per_day
    }

    /// Day for a zero-based row, or `None` if the row is outside the list.
    #[must_use]
    pub fn day_for_row(&self, row: usize) -> Option<Day> {
        if row >= self.total || self.per_day == 0 {
            return None;
        }
        Day::from_index(row / self.per_day).ok()
    }

    /// Row range covered by `day`; empty for days past the end of the list.
    #[must_use]
    pub fn rows_for(&self, day: Day) -> Range<usize> {
        let start = day.index().saturating_mul(self.per_day).min(self.total);
        let end = start.saturating_add(self.per_day).min(self.total);
        start..end
    }

    /// Size of every bucket, indexed by `Day::index`.
    #[must_use]
    pub fn bucket_sizes(&self) -> [usize; DAY_COUNT as usize] {
        let mut sizes = [0; DAY_COUNT as usize];
        for day in Day::all() {
            sizes[day.index()] = self.rows_for(day).len();
        }
        sizes
    }

    /// Number of days that hold at least one row.
    #[must_use]
    pub fn populated_days(&self) -> usize {
        self.bucket_sizes().iter().filter(|size| **size > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u8) -> Day {
        Day::new(n).unwrap()
    }

    #[test]
    fn three_rows_fill_first_three_days() {
        let plan = DayPlan::for_total(3);
        assert_eq!(plan.per_day(), 1);
        assert_eq!(plan.rows_for(day(1)), 0..1);
        assert_eq!(plan.rows_for(day(2)), 1..2);
        assert_eq!(plan.rows_for(day(3)), 2..3);
        for n in 4..=30 {
            assert!(plan.rows_for(day(n)).is_empty(), "day {n} should be empty");
        }
        assert_eq!(plan.populated_days(), 3);
    }

    #[test]
    fn bucket_sizes_always_sum_to_total() {
        for total in [0, 1, 29, 30, 31, 59, 60, 61, 95, 570, 1000] {
            let plan = DayPlan::for_total(total);
            let sizes = plan.bucket_sizes();
            assert_eq!(sizes.len(), 30);
            assert_eq!(sizes.iter().sum::<usize>(), total, "total {total}");
        }
    }

    #[test]
    fn buckets_match_contiguous_ranges() {
        let total = 61;
        let plan = DayPlan::for_total(total);
        let per_day = total.div_ceil(30);
        for d in Day::all() {
            let k = d.index();
            let start = (k * per_day).min(total);
            let end = ((k + 1) * per_day).min(total);
            assert_eq!(plan.rows_for(d), start..end);
            for row in plan.rows_for(d) {
                assert_eq!(plan.day_for_row(row), Some(d));
            }
        }
        assert_eq!(plan.rows_for(day(21)), 60..61);
        assert!(plan.rows_for(day(22)).is_empty());
    }

    #[test]
    fn empty_list_has_no_days() {
        let plan = DayPlan::for_total(0);
        assert_eq!(plan.per_day(), 0);
        assert_eq!(plan.day_for_row(0), None);
        assert_eq!(plan.populated_days(), 0);
    }

    #[test]
    fn rows_past_the_end_have_no_day() {
        let plan = DayPlan::for_total(10);
        assert_eq!(plan.day_for_row(9), Some(day(10)));
        assert_eq!(plan.day_for_row(10), None);
    }
}
