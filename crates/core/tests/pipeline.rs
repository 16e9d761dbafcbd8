use chrono::{Datelike, Days, NaiveDate};
use meter_core::{
    EvaluationMode, MonthlyBucket, Sample, build_intervals, compute_monthly, compute_yearly,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn sample(year: i32, month: u32, day: u32, value: f64) -> Sample {
    Sample::new(date(year, month, day), value)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn bucket_sum(buckets: &[MonthlyBucket]) -> f64 {
    buckets.iter().map(|bucket| bucket.value).sum()
}

/// Irregular counter history spanning several year boundaries, with one reset.
fn irregular_counter() -> Vec<Sample> {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    let mut day = date(2020, 11, 17);
    let mut value = 1_000.0;
    let mut samples = Vec::new();
    for index in 0..40 {
        samples.push(Sample::new(day, value));
        day = day
            .checked_add_days(Days::new(5 + next() % 60))
            .expect("date in range");
        value = if index == 25 {
            12.0
        } else {
            value + (next() % 500) as f64 / 4.0
        };
    }
    samples
}

#[test]
fn counter_scenario_distributes_consumption_by_day() {
    let samples = [
        sample(2023, 1, 1, 0.0),
        sample(2023, 2, 1, 30.0),
        sample(2023, 3, 1, 90.0),
    ];
    let buckets = compute_monthly(&samples, EvaluationMode::Difference).expect("monthly");

    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets[0].month_name, "Jan");
    assert_close(buckets[0].value, 30.0 * 30.0 / 31.0);
    assert_close(buckets[1].value, 30.0 / 31.0 + 27.0 * 60.0 / 28.0);
    assert_close(buckets[2].value, 60.0 / 28.0);

    let stats = compute_yearly(&samples, &buckets).expect("yearly");
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].year, 2023);
    assert_eq!(stats[0].sample_count, 3);
    assert_close(stats[0].total, 90.0);
    assert_eq!(stats[0].active_months, 3);
    assert_close(stats[0].avg_per_active_month, 30.0);
    assert_eq!(stats[0].active_days, 59);
    assert_close(stats[0].avg_per_active_day, 90.0 / 59.0);
}

#[test]
fn measurement_scenario_averages_interpolated_days() {
    let samples = [sample(2023, 1, 1, 10.0), sample(2023, 3, 1, 30.0)];
    let buckets = compute_monthly(&samples, EvaluationMode::Absolute).expect("monthly");

    assert_eq!(buckets.len(), 3);
    assert_close(buckets[0].value, 10.0 + 300.0 / 59.0);
    assert_close(buckets[1].value, 10.0 + 890.0 / 59.0);
    assert_close(buckets[2].value, 30.0);
    assert_eq!(buckets[2].month_end, date(2023, 3, 31));
}

#[test]
fn counter_reset_contributes_nothing() {
    let samples = [sample(2023, 1, 1, 100.0), sample(2023, 2, 1, 50.0)];
    let series = build_intervals(&samples).expect("intervals");
    assert_eq!(series.intervals[0].effective_delta, 0.0);

    let buckets = compute_monthly(&samples, EvaluationMode::Difference).expect("monthly");
    assert_eq!(buckets.len(), 2);
    assert_close(bucket_sum(&buckets), 0.0);
}

#[test]
fn single_sample_boundaries() {
    let samples = [sample(2024, 2, 29, 81.2)];
    assert!(
        compute_monthly(&samples, EvaluationMode::Difference)
            .expect("monthly")
            .is_empty()
    );
    let buckets = compute_monthly(&samples, EvaluationMode::Absolute).expect("monthly");
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].value, 81.2);
    assert_eq!(buckets[0].month_end, date(2024, 2, 29));
}

#[test]
fn consumption_is_conserved_across_buckets() {
    let samples = irregular_counter();
    let series = build_intervals(&samples).expect("intervals");
    let buckets = compute_monthly(&samples, EvaluationMode::Difference).expect("monthly");
    let expected = series.total_effective_delta();

    assert!((bucket_sum(&buckets) - expected).abs() < 1e-6);

    let stats = compute_yearly(&samples, &buckets).expect("yearly");
    let yearly_total: f64 = stats.iter().map(|stat| stat.total).sum();
    assert!((yearly_total - expected).abs() < 1e-6);
}

#[test]
fn every_month_in_span_has_a_counter_bucket() {
    let samples = irregular_counter();
    let buckets = compute_monthly(&samples, EvaluationMode::Difference).expect("monthly");
    for pair in buckets.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        let expected = prev.month_end.succ_opt().expect("date");
        assert_eq!((next.year, next.month), (expected.year(), expected.month()));
    }
    let first = samples.first().expect("first");
    let last = samples.last().expect("last");
    assert_eq!(buckets.first().expect("bucket").month, 11);
    assert_eq!(
        buckets.last().expect("bucket").month_end,
        meter_core::month_end(last.date)
    );
    assert!(buckets.first().expect("bucket").month_end >= first.date);
}

#[test]
fn output_does_not_depend_on_input_order() {
    let samples = irregular_counter();
    let mut reversed = samples.clone();
    reversed.reverse();
    let mut rotated = samples.clone();
    rotated.rotate_left(17);

    for mode in [EvaluationMode::Difference, EvaluationMode::Absolute] {
        let expected = compute_monthly(&samples, mode).expect("monthly");
        assert_eq!(compute_monthly(&reversed, mode).expect("monthly"), expected);
        assert_eq!(compute_monthly(&rotated, mode).expect("monthly"), expected);
        assert_eq!(
            compute_yearly(&rotated, &expected).expect("yearly"),
            compute_yearly(&samples, &expected).expect("yearly")
        );
    }
}

#[test]
fn monthly_is_idempotent() {
    let samples = irregular_counter();
    for mode in [EvaluationMode::Difference, EvaluationMode::Absolute] {
        let first = compute_monthly(&samples, mode).expect("monthly");
        let second = compute_monthly(&samples, mode).expect("monthly");
        assert_eq!(first, second);
    }
}

#[test]
fn year_boundary_interval_splits_coverage() {
    let samples = [sample(2022, 12, 15, 0.0), sample(2023, 1, 15, 310.0)];
    let buckets = compute_monthly(&samples, EvaluationMode::Difference).expect("monthly");
    assert_close(buckets[0].value, 160.0);
    assert_close(buckets[1].value, 150.0);

    let stats = compute_yearly(&samples, &buckets).expect("yearly");
    assert_eq!(stats.len(), 2);
    let (stat_2023, stat_2022) = (&stats[0], &stats[1]);
    assert_eq!(stat_2023.year, 2023);
    assert_eq!(stat_2023.active_days, 15);
    assert_close(stat_2023.avg_per_active_day, 10.0);
    assert_eq!(stat_2022.year, 2022);
    assert_eq!(stat_2022.active_days, 16);
    assert_close(stat_2022.avg_per_active_day, 10.0);
}

#[test]
fn duplicate_dates_fail_every_entry_point() {
    let samples = [sample(2023, 1, 1, 1.0), sample(2023, 1, 1, 2.0)];
    assert!(build_intervals(&samples).is_err());
    assert!(compute_monthly(&samples, EvaluationMode::Absolute).is_err());
    assert!(compute_yearly(&samples, &[]).is_err());
}
