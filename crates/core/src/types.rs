use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const DEFAULT_UNIT: &str = "Units";

/// One dated measurement for a tracked category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub date: NaiveDate,
    pub value: f64,
}

impl Sample {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Span between two chronologically adjacent samples.
///
/// `effective_delta` is `raw_delta` with negative values clamped to zero, so a
/// replaced or rolled-over counter contributes no consumption for that span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub elapsed_days: i64,
    pub raw_delta: f64,
    pub effective_delta: f64,
    pub daily_rate: f64,
}

impl Interval {
    pub fn is_reset(&self) -> bool {
        self.raw_delta < 0.0
    }

    /// Whether `day` is charged at this interval's rate: `(start_date, end_date]`.
    pub fn charges(&self, day: NaiveDate) -> bool {
        day > self.start_date && day <= self.end_date
    }
}

/// Sorted samples paired with the intervals between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntervalSeries {
    pub samples: Vec<Sample>,
    pub intervals: Vec<Interval>,
}

impl IntervalSeries {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.samples.first().map(|sample| sample.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.samples.last().map(|sample| sample.date)
    }

    pub fn total_effective_delta(&self) -> f64 {
        self.intervals
            .iter()
            .map(|interval| interval.effective_delta)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    /// Samples are readings of a monotonically increasing counter.
    #[default]
    Difference,
    /// Samples are direct point-in-time measurements.
    Absolute,
}

impl EvaluationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Difference => "difference",
            Self::Absolute => "absolute",
        }
    }

    pub fn value_label(&self) -> &'static str {
        match self {
            Self::Difference => "Monthly Total",
            Self::Absolute => "Value",
        }
    }
}

impl fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvaluationMode {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "difference" => Ok(Self::Difference),
            "absolute" => Ok(Self::Absolute),
            other => Err(CoreError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub month_end: NaiveDate,
    pub value: f64,
    pub month_name: String,
}

impl MonthlyBucket {
    /// `YYYY-MM` label used by text reports.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyStat {
    pub year: i32,
    pub sample_count: usize,
    pub total: f64,
    pub active_months: usize,
    pub active_days: i64,
    pub avg_per_active_month: f64,
    pub avg_per_active_day: f64,
}

/// Per-category settings supplied by the store; the unit is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub unit: String,
    pub mode: EvaluationMode,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            unit: DEFAULT_UNIT.to_string(),
            mode: EvaluationMode::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_mode_parses_case_insensitively() {
        assert_eq!(
            "Absolute".parse::<EvaluationMode>().expect("mode"),
            EvaluationMode::Absolute
        );
        assert_eq!(
            " difference ".parse::<EvaluationMode>().expect("mode"),
            EvaluationMode::Difference
        );
        assert!("counter".parse::<EvaluationMode>().is_err());
    }

    #[test]
    fn evaluation_mode_serializes_lowercase() {
        let json = serde_json::to_string(&EvaluationMode::Absolute).expect("json");
        assert_eq!(json, "\"absolute\"");
    }

    #[test]
    fn interval_charges_half_open_span() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).expect("date");
        let end = NaiveDate::from_ymd_opt(2023, 1, 3).expect("date");
        let interval = Interval {
            start_date: start,
            end_date: end,
            elapsed_days: 2,
            raw_delta: 4.0,
            effective_delta: 4.0,
            daily_rate: 2.0,
        };
        assert!(!interval.charges(start));
        assert!(interval.charges(start.succ_opt().expect("date")));
        assert!(interval.charges(end));
        assert!(!interval.charges(end.succ_opt().expect("date")));
    }
}
