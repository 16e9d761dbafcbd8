use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{MonthlyBucket, YearlyStat};

/// Inclusive year filter; an open end matches everything on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub from: Option<i32>,
    pub to: Option<i32>,
}

impl YearRange {
    pub fn new(from: Option<i32>, to: Option<i32>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.from.is_none_or(|from| year >= from) && self.to.is_none_or(|to| year <= to)
    }
}

pub fn filter_monthly(buckets: &[MonthlyBucket], range: YearRange) -> Vec<MonthlyBucket> {
    buckets
        .iter()
        .filter(|bucket| range.contains(bucket.year))
        .cloned()
        .collect()
}

pub fn filter_yearly(stats: &[YearlyStat], range: YearRange) -> Vec<YearlyStat> {
    stats
        .iter()
        .filter(|stat| range.contains(stat.year))
        .cloned()
        .collect()
}

/// Smallest and largest bucket year.
pub fn year_bounds(buckets: &[MonthlyBucket]) -> Option<(i32, i32)> {
    let min = buckets.iter().map(|bucket| bucket.year).min()?;
    let max = buckets.iter().map(|bucket| bucket.year).max()?;
    Some((min, max))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRow {
    pub year: i32,
    /// Index 0 is January.
    pub months: [Option<f64>; 12],
}

/// Pivots buckets into one row per year for month-over-month comparison.
pub fn year_over_year(buckets: &[MonthlyBucket]) -> Vec<YearRow> {
    let mut rows: BTreeMap<i32, [Option<f64>; 12]> = BTreeMap::new();
    for bucket in buckets {
        let Some(index) = bucket.month.checked_sub(1).filter(|index| *index < 12) else {
            continue;
        };
        rows.entry(bucket.year).or_insert([None; 12])[index as usize] = Some(bucket.value);
    }
    rows.into_iter()
        .map(|(year, months)| YearRow { year, months })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub origin: NaiveDate,
    pub slope_per_day: f64,
    pub intercept: f64,
}

impl Trend {
    pub fn value_at(&self, date: NaiveDate) -> f64 {
        let x = (date - self.origin).num_days() as f64;
        self.intercept + self.slope_per_day * x
    }
}

/// Least-squares line through bucket values against their month-end dates.
pub fn linear_trend(buckets: &[MonthlyBucket]) -> Option<Trend> {
    if buckets.len() < 2 {
        return None;
    }
    let origin = buckets.iter().map(|bucket| bucket.month_end).min()?;
    let points: Vec<(f64, f64)> = buckets
        .iter()
        .map(|bucket| ((bucket.month_end - origin).num_days() as f64, bucket.value))
        .collect();
    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;
    let (cov, var) = points.iter().fold((0.0, 0.0), |(cov, var), (x, y)| {
        let dx = x - mean_x;
        (cov + dx * (y - mean_y), var + dx * dx)
    });
    if var == 0.0 {
        return None;
    }
    let slope_per_day = cov / var;
    Some(Trend {
        origin,
        slope_per_day,
        intercept: mean_y - slope_per_day * mean_x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{month_end, month_name};

    fn bucket(year: i32, month: u32, value: f64) -> MonthlyBucket {
        let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid date");
        MonthlyBucket {
            year,
            month,
            month_end: month_end(first),
            value,
            month_name: month_name(month).to_string(),
        }
    }

    #[test]
    fn year_range_is_inclusive_and_open_ended() {
        let range = YearRange::new(Some(2021), Some(2022));
        assert!(!range.contains(2020));
        assert!(range.contains(2021));
        assert!(range.contains(2022));
        assert!(!range.contains(2023));
        assert!(YearRange::default().contains(1900));
        assert!(YearRange::new(None, Some(2000)).contains(1999));
    }

    #[test]
    fn filter_monthly_keeps_selected_years() {
        let buckets = vec![bucket(2021, 12, 1.0), bucket(2022, 1, 2.0), bucket(2023, 1, 3.0)];
        let kept = filter_monthly(&buckets, YearRange::new(Some(2022), None));
        assert_eq!(kept.len(), 2);
        assert_eq!(year_bounds(&kept), Some((2022, 2023)));
        assert_eq!(year_bounds(&[]), None);
    }

    #[test]
    fn year_over_year_places_values_by_month() {
        let buckets = vec![bucket(2022, 11, 4.0), bucket(2022, 12, 5.0), bucket(2023, 1, 6.0)];
        let rows = year_over_year(&buckets);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].year, 2022);
        assert_eq!(rows[0].months[10], Some(4.0));
        assert_eq!(rows[0].months[11], Some(5.0));
        assert_eq!(rows[0].months[0], None);
        assert_eq!(rows[1].months[0], Some(6.0));
    }

    #[test]
    fn linear_trend_recovers_a_straight_line() {
        let buckets: Vec<MonthlyBucket> = (1..=6)
            .map(|month| {
                let mut b = bucket(2023, month, 0.0);
                let days = (b.month_end - month_end(NaiveDate::from_ymd_opt(2023, 1, 1).expect("date")))
                    .num_days() as f64;
                b.value = 10.0 + 0.5 * days;
                b
            })
            .collect();
        let trend = linear_trend(&buckets).expect("trend");
        assert!((trend.slope_per_day - 0.5).abs() < 1e-9);
        assert!((trend.intercept - 10.0).abs() < 1e-9);
        let june_end = NaiveDate::from_ymd_opt(2023, 6, 30).expect("date");
        assert!((trend.value_at(june_end) - buckets[5].value).abs() < 1e-9);
    }

    #[test]
    fn linear_trend_needs_two_points() {
        assert!(linear_trend(&[bucket(2023, 1, 1.0)]).is_none());
    }
}
