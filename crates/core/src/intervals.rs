use crate::error::{CoreError, Result};
use crate::types::{Interval, IntervalSeries, Sample};

/// Sorts `samples` by date and derives the interval between each adjacent pair.
///
/// Negative deltas (a counter that went backwards) are clamped to zero. Two
/// samples sharing a date are rejected rather than merged.
pub fn build_intervals(samples: &[Sample]) -> Result<IntervalSeries> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    let mut intervals = Vec::with_capacity(sorted.len().saturating_sub(1));
    for pair in sorted.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let elapsed_days = (next.date - prev.date).num_days();
        if elapsed_days <= 0 {
            return Err(CoreError::MalformedInput { date: next.date });
        }
        let raw_delta = next.value - prev.value;
        let effective_delta = raw_delta.max(0.0);
        if raw_delta < 0.0 {
            tracing::debug!(
                start = %prev.date,
                end = %next.date,
                raw_delta,
                "counter went backwards, clamping interval to zero"
            );
        }
        intervals.push(Interval {
            start_date: prev.date,
            end_date: next.date,
            elapsed_days,
            raw_delta,
            effective_delta,
            daily_rate: effective_delta / elapsed_days as f64,
        });
    }

    Ok(IntervalSeries {
        samples: sorted,
        intervals,
    })
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
    fn empty_input_yields_empty_series() {
        let series = build_intervals(&[]).expect("series");
        assert!(series.is_empty());
        assert!(series.intervals.is_empty());
    }

    #[test]
    fn single_sample_has_no_intervals() {
        let series = build_intervals(&[sample(2023, 5, 1, 12.0)]).expect("series");
        assert_eq!(series.samples.len(), 1);
        assert!(series.intervals.is_empty());
    }

    #[test]
    fn sorts_and_pairs_adjacent_samples() {
        let series = build_intervals(&[
            sample(2023, 3, 1, 90.0),
            sample(2023, 1, 1, 0.0),
            sample(2023, 2, 1, 30.0),
        ])
        .expect("series");

        assert_eq!(series.samples[0].value, 0.0);
        assert_eq!(series.samples[2].value, 90.0);
        assert_eq!(series.intervals.len(), 2);

        let first = series.intervals[0];
        assert_eq!(first.elapsed_days, 31);
        assert_eq!(first.raw_delta, 30.0);
        assert!((first.daily_rate - 30.0 / 31.0).abs() < 1e-12);

        let second = series.intervals[1];
        assert_eq!(second.elapsed_days, 28);
        assert!((second.daily_rate - 60.0 / 28.0).abs() < 1e-12);
    }

    #[test]
    fn negative_delta_is_clamped_to_zero() {
        let series =
            build_intervals(&[sample(2023, 1, 1, 100.0), sample(2023, 2, 1, 50.0)]).expect("series");
        let interval = series.intervals[0];
        assert_eq!(interval.raw_delta, -50.0);
        assert_eq!(interval.effective_delta, 0.0);
        assert_eq!(interval.daily_rate, 0.0);
        assert!(interval.is_reset());
    }

    #[test]
    fn duplicate_dates_are_rejected() {
        let err = build_intervals(&[
            sample(2023, 1, 1, 1.0),
            sample(2023, 1, 5, 2.0),
            sample(2023, 1, 5, 3.0),
        ])
        .expect_err("duplicate");
        match err {
            CoreError::MalformedInput { date } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2023, 1, 5).expect("date"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
