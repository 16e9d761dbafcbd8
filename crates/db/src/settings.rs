use rusqlite::params;

use crate::Db;
use crate::error::Result;

const DEFAULT_USER_KEY: &str = "default_user";
const FALLBACK_USER: &str = "local";

impl Db {
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM app_setting WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            Ok(Some(row.get::<_, String>(0)?))
        } else {
            Ok(None)
        }
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO app_setting (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    pub fn get_default_user(&self) -> Result<String> {
        let user = self
            .get_setting(DEFAULT_USER_KEY)?
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_USER.to_string());
        Ok(user)
    }

    pub fn set_default_user(&self, user_id: &str) -> Result<()> {
        self.set_setting(DEFAULT_USER_KEY, user_id)
    }
}
