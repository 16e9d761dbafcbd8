use chrono::{NaiveDate, Utc};
use meter_core::Sample;
use rusqlite::params;

use crate::Db;
use crate::error::Result;
use crate::helpers::{format_date, parse_date};

const UPSERT_READING: &str = r#"
    INSERT INTO reading (user_id, category, reading_date, value, recorded_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
    ON CONFLICT(user_id, category, reading_date)
    DO UPDATE SET value = excluded.value, recorded_at = excluded.recorded_at
"#;

impl Db {
    /// Stores one reading; a second write for the same date replaces the first.
    pub fn insert_reading(&self, user_id: &str, category: &str, sample: &Sample) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            UPSERT_READING,
            params![user_id, category, format_date(sample.date), sample.value, now],
        )?;
        Ok(())
    }

    pub fn insert_readings(
        &mut self,
        user_id: &str,
        category: &str,
        samples: &[Sample],
    ) -> Result<usize> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        let mut written = 0usize;
        {
            let mut stmt = tx.prepare(UPSERT_READING)?;
            for sample in samples {
                written += stmt.execute(params![
                    user_id,
                    category,
                    format_date(sample.date),
                    sample.value,
                    now
                ])?;
            }
        }
        tx.commit()?;
        Ok(written)
    }

    pub fn list_readings(&self, user_id: &str, category: &str) -> Result<Vec<Sample>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT reading_date, value
            FROM reading
            WHERE user_id = ?1 AND category = ?2
            ORDER BY reading_date ASC
            "#,
        )?;
        let rows = stmt
            .query_map(params![user_id, category], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter()
            .map(|(date, value)| Ok(Sample::new(parse_date(&date)?, value)))
            .collect()
    }

    pub fn delete_reading(&self, user_id: &str, category: &str, date: NaiveDate) -> Result<bool> {
        let removed = self.conn.execute(
            "DELETE FROM reading WHERE user_id = ?1 AND category = ?2 AND reading_date = ?3",
            params![user_id, category, format_date(date)],
        )?;
        Ok(removed > 0)
    }

    pub fn count_readings(&self, user_id: &str, category: &str) -> Result<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM reading WHERE user_id = ?1 AND category = ?2",
            params![user_id, category],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }
}
