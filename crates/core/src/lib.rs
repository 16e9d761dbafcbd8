//! Reconstruction of monthly and yearly statistics from sparse dated readings.
//!
//! The pipeline is pure: [`build_intervals`] sorts and pairs samples,
//! [`compute_monthly`] expands them into a daily series and folds it into
//! calendar months, and [`compute_yearly`] summarizes the months per year.

mod calendar;
mod daily;
mod error;
mod intervals;
mod monthly;
mod types;
mod views;
mod yearly;

pub use calendar::{MONTH_NAMES, month_end, month_name};
pub use daily::{Aggregation, DailySeries};
pub use error::{CoreError, Result};
pub use intervals::build_intervals;
pub use monthly::{compute_monthly, monthly_from_series};
pub use types::{
    CategoryConfig, DEFAULT_UNIT, EvaluationMode, Interval, IntervalSeries, MonthlyBucket, Sample,
    YearlyStat,
};
pub use views::{
    Trend, YearRange, YearRow, filter_monthly, filter_yearly, linear_trend, year_bounds,
    year_over_year,
};
pub use yearly::{active_days_in_year, compute_yearly, yearly_from_series};
