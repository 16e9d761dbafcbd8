use std::collections::BTreeMap;
use std::io::Read;

use chrono::NaiveDate;
use meter_core::Sample;
use meter_db::Db;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AppError, Result};
use crate::services::{SharedConfig, missing_category, open_db, require_category};
use crate::util::time::parse_reading_date;

/// One entry of a structured import file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportRow {
    pub meter_type: String,
    pub date: String,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub value: f64,
}

/// Summary returned after importing readings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportStats {
    pub rows_read: usize,
    pub readings_written: usize,
    pub issues: Vec<ImportIssue>,
}

/// Row that was skipped during import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportIssue {
    pub row: usize,
    pub message: String,
}

#[derive(Clone)]
pub struct ReadingsService {
    config: SharedConfig,
}

impl ReadingsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn list(&self, user_id: &str, category: &str) -> Result<Vec<Sample>> {
        let db = self.db()?;
        require_category(&db, user_id, category)?;
        Ok(db.list_readings(user_id, category)?)
    }

    /// Records a reading; an existing reading on the same date is overwritten.
    pub fn add(&self, user_id: &str, category: &str, date: &str, value: f64) -> Result<Sample> {
        let date = parse_reading_date(date)?;
        validate_value(value)?;
        let db = self.db()?;
        require_category(&db, user_id, category)?;
        let sample = Sample::new(date, value);
        db.insert_reading(user_id, category, &sample)?;
        tracing::debug!(user_id, category, %date, value, "stored reading");
        Ok(sample)
    }

    pub fn delete(&self, user_id: &str, category: &str, date: NaiveDate) -> Result<()> {
        let db = self.db()?;
        if !db.delete_reading(user_id, category, date)? {
            return Err(AppError::NotFound(format!(
                "no reading for {} on {}",
                category, date
            )));
        }
        Ok(())
    }

    /// Reads a JSON array of rows; a malformed element becomes an issue for that row only.
    pub fn import_json<R: Read>(&self, user_id: &str, reader: R) -> Result<ImportStats> {
        let values: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
        let rows = values
            .into_iter()
            .map(|value| {
                serde_json::from_value::<ImportRow>(value)
                    .map_err(|err| AppError::InvalidInput(format!("malformed row: {}", err)))
            })
            .collect();
        self.import_parsed(user_id, rows)
    }

    pub fn import_rows(&self, user_id: &str, rows: &[ImportRow]) -> Result<ImportStats> {
        self.import_parsed(user_id, rows.iter().cloned().map(Ok).collect())
    }

    /// Writes valid rows grouped per category; invalid rows become issues.
    ///
    /// Rows repeating a (category, date) pair collapse to the last one.
    fn import_parsed(&self, user_id: &str, rows: Vec<Result<ImportRow>>) -> Result<ImportStats> {
        let mut db = self.db()?;
        let mut stats = ImportStats {
            rows_read: rows.len(),
            ..ImportStats::default()
        };
        let mut grouped: BTreeMap<String, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
        for (index, row) in rows.into_iter().enumerate() {
            let checked = row.and_then(|row| {
                let sample = validate_row(&db, user_id, &row)?;
                Ok((row.meter_type.trim().to_string(), sample))
            });
            match checked {
                Ok((category, sample)) => {
                    grouped
                        .entry(category)
                        .or_default()
                        .insert(sample.date, sample.value);
                }
                Err(err @ (AppError::InvalidInput(_) | AppError::NotFound(_))) => {
                    tracing::warn!(row = index + 1, %err, "skipping import row");
                    stats.issues.push(ImportIssue {
                        row: index + 1,
                        message: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }
        for (category, by_date) in grouped {
            let samples: Vec<Sample> = by_date
                .into_iter()
                .map(|(date, value)| Sample::new(date, value))
                .collect();
            stats.readings_written += db.insert_readings(user_id, &category, &samples)?;
        }
        tracing::info!(
            user_id,
            rows = stats.rows_read,
            written = stats.readings_written,
            issues = stats.issues.len(),
            "import finished"
        );
        Ok(stats)
    }
}

/// Accepts `12.5` as well as `"12.5"`.
fn number_or_numeric_string<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawValue {
        Number(f64),
        Text(String),
    }

    match RawValue::deserialize(deserializer)? {
        RawValue::Number(value) => Ok(value),
        RawValue::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("value {:?} is not a number", text))),
    }
}

fn validate_value(value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AppError::InvalidInput(format!(
            "reading value must be finite, got {}",
            value
        )));
    }
    Ok(())
}

fn validate_row(db: &Db, user_id: &str, row: &ImportRow) -> Result<Sample> {
    let category = row.meter_type.trim();
    if db.get_category(user_id, category)?.is_none() {
        return Err(missing_category(category));
    }
    let date = parse_reading_date(&row.date)?;
    validate_value(row.value)?;
    Ok(Sample::new(date, row.value))
}
