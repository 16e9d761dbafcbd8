use chrono::NaiveDate;
use meter_core::{CategoryConfig, DEFAULT_UNIT, EvaluationMode};
use rusqlite::Row;

use crate::error::Result;
use crate::types::Category;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)?)
}

pub(crate) fn config_from_columns(unit: Option<String>, eval_mode: Option<String>) -> CategoryConfig {
    let unit = unit
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_UNIT.to_string());
    let mode = match eval_mode.as_deref() {
        None => EvaluationMode::default(),
        Some(value) => value.parse::<EvaluationMode>().unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to default evaluation mode");
            EvaluationMode::default()
        }),
    };
    CategoryConfig { unit, mode }
}

pub(crate) fn row_to_category(row: &Row<'_>) -> std::result::Result<Category, rusqlite::Error> {
    Ok(Category {
        name: row.get(0)?,
        position: row.get(1)?,
        config: config_from_columns(row.get(2)?, row.get(3)?),
        title: row.get(4)?,
    })
}
