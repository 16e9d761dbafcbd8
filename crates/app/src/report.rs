use meter_core::{CategoryConfig, MonthlyBucket, YearlyStat};
use serde::{Deserialize, Serialize};

const HEADER: &str = "Meter Type, Month, Value, Unit";

/// Aggregated view of one category, ready to be rendered by a frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: String,
    pub title: Option<String>,
    pub config: CategoryConfig,
    pub monthly: Vec<MonthlyBucket>,
    pub yearly: Vec<YearlyStat>,
}

impl CategoryReport {
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.category)
    }

    pub fn value_label(&self) -> &'static str {
        self.config.mode.value_label()
    }
}

/// Renders monthly buckets as the line-per-month text consumed by the chat assistant.
pub fn format_report(reports: &[CategoryReport]) -> String {
    let mut lines = vec![HEADER.to_string()];
    for report in reports {
        for bucket in &report.monthly {
            lines.push(format!(
                "{}, {}, {:.2}, {}",
                report.category,
                bucket.label(),
                bucket.value,
                report.config.unit
            ));
        }
    }
    lines.join("\n")
}

/// Human-readable yearly summary block for one category.
pub fn format_yearly(report: &CategoryReport) -> String {
    let unit = &report.config.unit;
    let mut lines = vec![format!("{} ({})", report.display_name(), report.value_label())];
    for stat in &report.yearly {
        lines.push(format!(
            "{}: data points {}, total {:.1} {unit}, avg monthly {:.1} {unit}, avg daily {:.1} {unit}",
            stat.year,
            stat.sample_count,
            stat.total,
            stat.avg_per_active_month,
            stat.avg_per_active_day,
        ));
    }
    lines.join("\n")
}
