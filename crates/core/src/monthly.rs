use crate::daily::{Aggregation, DailySeries};
use crate::error::Result;
use crate::intervals::build_intervals;
use crate::types::{EvaluationMode, IntervalSeries, MonthlyBucket, Sample};

/// Calendar-month aggregates for one category.
///
/// `Difference` sums the per-day consumption and needs two samples;
/// `Absolute` averages interpolated values and needs one.
pub fn compute_monthly(samples: &[Sample], mode: EvaluationMode) -> Result<Vec<MonthlyBucket>> {
    let series = build_intervals(samples)?;
    Ok(monthly_from_series(&series, mode))
}

pub fn monthly_from_series(series: &IntervalSeries, mode: EvaluationMode) -> Vec<MonthlyBucket> {
    let buckets = match mode {
        EvaluationMode::Difference => DailySeries::from_intervals(series)
            .map(|daily| daily.resample(Aggregation::Sum))
            .unwrap_or_default(),
        EvaluationMode::Absolute => DailySeries::interpolated(&series.samples)
            .map(|daily| daily.resample(Aggregation::Mean))
            .unwrap_or_default(),
    };
    tracing::debug!(
        %mode,
        samples = series.samples.len(),
        intervals = series.intervals.len(),
        buckets = buckets.len(),
        "computed monthly buckets"
    );
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(year: i32, month: u32, day: u32, value: f64) -> Sample {
        Sample::new(
            NaiveDate::from_ymd_opt(year, month, day).expect("valid date"),
            value,
        )
    }

    #[test]
    fn difference_needs_two_samples() {
        let buckets =
            compute_monthly(&[sample(2023, 1, 1, 10.0)], EvaluationMode::Difference).expect("ok");
        assert!(buckets.is_empty());
        let buckets = compute_monthly(&[], EvaluationMode::Difference).expect("ok");
        assert!(buckets.is_empty());
    }

    #[test]
    fn absolute_single_sample_is_one_bucket() {
        let buckets =
            compute_monthly(&[sample(2023, 6, 15, 72.5)], EvaluationMode::Absolute).expect("ok");
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].year, 2023);
        assert_eq!(buckets[0].month, 6);
        assert_eq!(buckets[0].value, 72.5);
    }

    #[test]
    fn absolute_empty_input_yields_nothing() {
        let buckets = compute_monthly(&[], EvaluationMode::Absolute).expect("ok");
        assert!(buckets.is_empty());
    }

    #[test]
    fn difference_includes_zero_months_inside_span() {
        let buckets = compute_monthly(
            &[
                sample(2023, 1, 1, 100.0),
                sample(2023, 2, 1, 50.0),
                sample(2023, 4, 1, 50.0),
            ],
            EvaluationMode::Difference,
        )
        .expect("ok");
        assert_eq!(buckets.len(), 4);
        assert!(buckets.iter().all(|bucket| bucket.value == 0.0));
    }
}
