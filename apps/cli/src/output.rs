use meter_app::{Category, CategoryReport, ImportStats};
use meter_core::{MONTH_NAMES, MonthlyBucket, Sample, Trend, YearRow};
use serde::Serialize;

/// JSON shape of a category listing entry.
#[derive(Debug, Serialize)]
pub struct CategoryView<'a> {
    pub name: &'a str,
    pub position: i64,
    pub title: Option<&'a str>,
    pub unit: &'a str,
    pub mode: &'static str,
}

impl<'a> From<&'a Category> for CategoryView<'a> {
    fn from(category: &'a Category) -> Self {
        Self {
            name: &category.name,
            position: category.position,
            title: category.title.as_deref(),
            unit: &category.config.unit,
            mode: category.config.mode.as_str(),
        }
    }
}

pub fn json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn categories(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "no categories".to_string();
    }
    categories
        .iter()
        .map(|category| {
            let mut line = format!(
                "{}. {} ({}, {})",
                category.position + 1,
                category.name,
                category.config.unit,
                category.config.mode
            );
            if let Some(title) = &category.title {
                line.push_str(&format!(" \"{}\"", title));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn readings(samples: &[Sample], unit: &str) -> String {
    if samples.is_empty() {
        return "no readings".to_string();
    }
    samples
        .iter()
        .map(|sample| format!("{}  {} {}", sample.date, sample.value, unit))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn monthly(report: &CategoryReport) -> String {
    let mut lines = vec![format!("{} ({})", report.display_name(), report.value_label())];
    lines.extend(report.monthly.iter().map(|bucket| month_line(bucket, &report.config.unit)));
    lines.join("\n")
}

fn month_line(bucket: &MonthlyBucket, unit: &str) -> String {
    format!(
        "{}  {}  {:>12.2} {}",
        bucket.label(),
        bucket.month_name,
        bucket.value,
        unit
    )
}

pub fn compare(rows: &[YearRow]) -> String {
    let mut header = String::from("Year");
    for name in MONTH_NAMES {
        header.push_str(&format!(" {:>9}", name));
    }
    let mut lines = vec![header];
    for row in rows {
        let mut line = format!("{:<4}", row.year);
        for value in row.months {
            match value {
                Some(value) => line.push_str(&format!(" {:>9.1}", value)),
                None => line.push_str(&format!(" {:>9}", "-")),
            }
        }
        lines.push(line);
    }
    lines.join("\n")
}

pub fn trend(trend: Option<&Trend>, unit: &str) -> String {
    match trend {
        Some(trend) => format!(
            "{:+.4} {unit}/day ({:+.2} {unit}/year), {:.2} {unit} at {}",
            trend.slope_per_day,
            trend.slope_per_day * 365.0,
            trend.intercept,
            trend.origin
        ),
        None => "not enough monthly values for a trend".to_string(),
    }
}

pub fn import(stats: &ImportStats) -> String {
    let mut lines = vec![format!(
        "read {} rows, wrote {} readings, skipped {}",
        stats.rows_read,
        stats.readings_written,
        stats.issues.len()
    )];
    lines.extend(
        stats
            .issues
            .iter()
            .map(|issue| format!("  row {}: {}", issue.row, issue.message)),
    );
    lines.join("\n")
}
