use std::collections::BTreeSet;

use chrono::Datelike;

use crate::calendar::{days_between, year_end};
use crate::error::Result;
use crate::intervals::build_intervals;
use crate::types::{Interval, IntervalSeries, MonthlyBucket, Sample, YearlyStat};

/// Per-year totals and averages, newest year first.
///
/// Only years that contain at least one sample are reported.
pub fn compute_yearly(samples: &[Sample], buckets: &[MonthlyBucket]) -> Result<Vec<YearlyStat>> {
    let series = build_intervals(samples)?;
    Ok(yearly_from_series(&series, buckets))
}

pub fn yearly_from_series(series: &IntervalSeries, buckets: &[MonthlyBucket]) -> Vec<YearlyStat> {
    let years: BTreeSet<i32> = series
        .samples
        .iter()
        .map(|sample| sample.date.year())
        .collect();

    years
        .into_iter()
        .rev()
        .map(|year| {
            let sample_count = series
                .samples
                .iter()
                .filter(|sample| sample.date.year() == year)
                .count();
            let in_year = buckets.iter().filter(|bucket| bucket.year == year);
            let (total, active_months) = in_year.fold((0.0, 0usize), |(sum, active), bucket| {
                let active = if bucket.value > 0.0 { active + 1 } else { active };
                (sum + bucket.value, active)
            });
            let avg_per_active_month = if active_months > 0 {
                total / active_months as f64
            } else {
                0.0
            };
            let active_days = active_days_in_year(&series.intervals, year).max(1);
            YearlyStat {
                year,
                sample_count,
                total,
                active_months,
                active_days,
                avg_per_active_month,
                avg_per_active_day: total / active_days as f64,
            }
        })
        .collect()
}

/// Days of `year` charged by some interval.
///
/// Intervals cover `(start_date, end_date]`, so the year is treated as
/// `(Dec 31 of year - 1, Dec 31 of year]` to line up with the same convention.
pub fn active_days_in_year(intervals: &[Interval], year: i32) -> i64 {
    let (Some(lower), Some(upper)) = (year_end(year - 1), year_end(year)) else {
        return 0;
    };
    intervals
        .iter()
        .filter(|interval| interval.end_date > lower && interval.start_date < upper)
        .map(|interval| {
            let start = interval.start_date.max(lower);
            let end = interval.end_date.min(upper);
            days_between(start, end)
        })
        .sum()
}
