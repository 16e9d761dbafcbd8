use chrono::NaiveDate;

use crate::calendar::{days_between, month_end, month_key, month_name};
use crate::types::{IntervalSeries, MonthlyBucket, Sample};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Sum,
    Mean,
}

/// Dense day-by-day reconstruction from the first to the last sample date.
///
/// `None` marks a day without a defined value.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    start: NaiveDate,
    values: Vec<Option<f64>>,
}

impl DailySeries {
    /// Spreads each interval's daily rate over `(start_date, end_date]`.
    ///
    /// Days not charged by any interval (the first sample day) stay at zero.
    /// Needs at least one interval.
    pub fn from_intervals(series: &IntervalSeries) -> Option<Self> {
        if series.intervals.is_empty() {
            return None;
        }
        let start = series.first_date()?;
        let end = series.last_date()?;
        let mut values = vec![Some(0.0); days_between(start, end) as usize + 1];
        for interval in &series.intervals {
            let from = days_between(start, interval.start_date) as usize + 1;
            let to = days_between(start, interval.end_date) as usize;
            for slot in &mut values[from..=to] {
                *slot = Some(interval.daily_rate);
            }
        }
        Some(Self { start, values })
    }

    /// Linear interpolation between bracketing samples, no extrapolation.
    ///
    /// `samples` must be sorted by date without duplicates, as produced by
    /// [`crate::build_intervals`].
    pub fn interpolated(samples: &[Sample]) -> Option<Self> {
        let first = samples.first()?;
        let last = samples.last()?;
        let start = first.date;
        let mut values = vec![None; days_between(start, last.date) as usize + 1];
        values[0] = Some(first.value);
        for pair in samples.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            let offset = days_between(start, prev.date) as usize;
            let span = days_between(prev.date, next.date);
            let slope = (next.value - prev.value) / span as f64;
            for step in 1..=span {
                values[offset + step as usize] = Some(prev.value + slope * step as f64);
            }
            // Pin the sampled day to the recorded value rather than the accumulated slope.
            values[offset + span as usize] = Some(next.value);
        }
        Some(Self { start, values })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.start.iter_days().zip(self.values.iter().copied())
    }

    pub fn value_on(&self, day: NaiveDate) -> Option<f64> {
        if day < self.start {
            return None;
        }
        self.values
            .get(days_between(self.start, day) as usize)
            .copied()
            .flatten()
    }

    /// Folds the days into calendar-month buckets.
    ///
    /// With [`Aggregation::Mean`] a month without defined days yields no bucket.
    pub fn resample(&self, aggregation: Aggregation) -> Vec<MonthlyBucket> {
        let mut buckets = Vec::new();
        let mut current: Option<MonthAccumulator> = None;
        for (day, value) in self.iter() {
            let key = month_key(day);
            match current.as_mut() {
                Some(acc) if acc.key == key => acc.push(value),
                _ => {
                    if let Some(done) = current.take() {
                        buckets.extend(done.finish(aggregation));
                    }
                    let mut acc = MonthAccumulator::new(key, day);
                    acc.push(value);
                    current = Some(acc);
                }
            }
        }
        if let Some(done) = current {
            buckets.extend(done.finish(aggregation));
        }
        buckets
    }
}

struct MonthAccumulator {
    key: (i32, u32),
    month_end: NaiveDate,
    sum: f64,
    defined_days: usize,
}

impl MonthAccumulator {
    fn new(key: (i32, u32), day: NaiveDate) -> Self {
        Self {
            key,
            month_end: month_end(day),
            sum: 0.0,
            defined_days: 0,
        }
    }

    fn push(&mut self, value: Option<f64>) {
        if let Some(value) = value {
            self.sum += value;
            self.defined_days += 1;
        }
    }

    fn finish(self, aggregation: Aggregation) -> Option<MonthlyBucket> {
        let value = match aggregation {
            Aggregation::Sum => self.sum,
            Aggregation::Mean => {
                if self.defined_days == 0 {
                    return None;
                }
                self.sum / self.defined_days as f64
            }
        };
        let (year, month) = self.key;
        Some(MonthlyBucket {
            year,
            month,
            month_end: self.month_end,
            value,
            month_name: month_name(month).to_string(),
        })
    }
}
