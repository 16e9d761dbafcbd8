use chrono::Utc;
use meter_core::CategoryConfig;
use rusqlite::{Connection, OptionalExtension, params};

use crate::Db;
use crate::error::{DbError, Result};
use crate::helpers::row_to_category;
use crate::types::{Category, MoveDirection};

impl Db {
    pub fn list_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT name, position, unit, eval_mode, title
            FROM category
            WHERE user_id = ?1
            ORDER BY position ASC, name ASC
            "#,
        )?;
        let rows = stmt
            .query_map(params![user_id], row_to_category)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn get_category(&self, user_id: &str, name: &str) -> Result<Option<Category>> {
        self.conn
            .query_row(
                r#"
                SELECT name, position, unit, eval_mode, title
                FROM category
                WHERE user_id = ?1 AND name = ?2
                "#,
                params![user_id, name],
                row_to_category,
            )
            .optional()
            .map_err(DbError::from)
    }

    pub fn get_category_config(&self, user_id: &str, name: &str) -> Result<Option<CategoryConfig>> {
        Ok(self
            .get_category(user_id, name)?
            .map(|category| category.config))
    }

    /// Appends a category at the end of the user's list; `false` if the name is taken.
    pub fn add_category(
        &self,
        user_id: &str,
        name: &str,
        config: &CategoryConfig,
        title: Option<&str>,
    ) -> Result<bool> {
        let now = Utc::now().to_rfc3339();
        let inserted = self.conn.execute(
            r#"
            INSERT OR IGNORE INTO category (user_id, name, position, unit, eval_mode, created_at, title)
            VALUES (
              ?1, ?2,
              (SELECT COALESCE(MAX(position) + 1, 0) FROM category WHERE user_id = ?1),
              ?3, ?4, ?5, ?6
            )
            "#,
            params![user_id, name, config.unit, config.mode.as_str(), now, title],
        )?;
        Ok(inserted > 0)
    }

    pub fn update_category_config(
        &self,
        user_id: &str,
        name: &str,
        config: &CategoryConfig,
    ) -> Result<bool> {
        let updated = self.conn.execute(
            "UPDATE category SET unit = ?1, eval_mode = ?2 WHERE user_id = ?3 AND name = ?4",
            params![config.unit, config.mode.as_str(), user_id, name],
        )?;
        Ok(updated > 0)
    }

    pub fn set_category_title(&self, user_id: &str, name: &str, title: Option<&str>) -> Result<bool> {
        let updated = self.conn.execute(
            "UPDATE category SET title = ?1 WHERE user_id = ?2 AND name = ?3",
            params![title, user_id, name],
        )?;
        Ok(updated > 0)
    }

    /// Swaps a category with its neighbour; `false` when it is missing or already at the edge.
    pub fn move_category(
        &mut self,
        user_id: &str,
        name: &str,
        direction: MoveDirection,
    ) -> Result<bool> {
        let mut names: Vec<String> = self
            .list_categories(user_id)?
            .into_iter()
            .map(|category| category.name)
            .collect();
        let Some(index) = names.iter().position(|value| value == name) else {
            return Ok(false);
        };
        let neighbour = match direction {
            MoveDirection::Up => index.checked_sub(1),
            MoveDirection::Down => Some(index + 1).filter(|next| *next < names.len()),
        };
        let Some(neighbour) = neighbour else {
            return Ok(false);
        };
        names.swap(index, neighbour);
        let tx = self.conn.transaction()?;
        write_positions(&tx, user_id, &names)?;
        tx.commit()?;
        Ok(true)
    }

    /// Drops the category entry and compacts positions. Readings are kept.
    pub fn remove_category(&mut self, user_id: &str, name: &str) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let removed = tx.execute(
            "DELETE FROM category WHERE user_id = ?1 AND name = ?2",
            params![user_id, name],
        )?;
        if removed > 0 {
            let names = {
                let mut stmt = tx.prepare(
                    "SELECT name FROM category WHERE user_id = ?1 ORDER BY position ASC, name ASC",
                )?;
                stmt.query_map(params![user_id], |row| row.get::<_, String>(0))?
                    .collect::<std::result::Result<Vec<_>, _>>()?
            };
            write_positions(&tx, user_id, &names)?;
        }
        tx.commit()?;
        Ok(removed > 0)
    }
}

fn write_positions(conn: &Connection, user_id: &str, names: &[String]) -> Result<()> {
    let mut stmt =
        conn.prepare("UPDATE category SET position = ?1 WHERE user_id = ?2 AND name = ?3")?;
    for (position, name) in names.iter().enumerate() {
        stmt.execute(params![position as i64, user_id, name])?;
    }
    Ok(())
}
