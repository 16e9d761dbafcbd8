use meter_core::CategoryConfig;
use meter_db::{Category, Db, MoveDirection};

use crate::error::{AppError, Result};
use crate::services::{SharedConfig, missing_category, open_db};

#[derive(Clone)]
pub struct CategoriesService {
    config: SharedConfig,
}

impl CategoriesService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn list(&self, user_id: &str) -> Result<Vec<Category>> {
        let db = self.db()?;
        Ok(db.list_categories(user_id)?)
    }

    pub fn get(&self, user_id: &str, name: &str) -> Result<Category> {
        let db = self.db()?;
        db.get_category(user_id, name)?
            .ok_or_else(|| missing_category(name))
    }

    pub fn add(
        &self,
        user_id: &str,
        name: &str,
        config: &CategoryConfig,
        title: Option<&str>,
    ) -> Result<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "category name must not be empty".to_string(),
            ));
        }
        let db = self.db()?;
        if !db.add_category(user_id, name, config, title)? {
            return Err(AppError::InvalidInput(format!(
                "category already exists: {}",
                name
            )));
        }
        tracing::info!(user_id, category = name, mode = %config.mode, "added category");
        db.get_category(user_id, name)?
            .ok_or_else(|| missing_category(name))
    }

    pub fn configure(&self, user_id: &str, name: &str, config: &CategoryConfig) -> Result<()> {
        let db = self.db()?;
        if !db.update_category_config(user_id, name, config)? {
            return Err(missing_category(name));
        }
        Ok(())
    }

    pub fn set_title(&self, user_id: &str, name: &str, title: Option<&str>) -> Result<()> {
        let db = self.db()?;
        if !db.set_category_title(user_id, name, title)? {
            return Err(missing_category(name));
        }
        Ok(())
    }

    /// Returns `false` when the category is already first/last.
    pub fn move_category(
        &self,
        user_id: &str,
        name: &str,
        direction: MoveDirection,
    ) -> Result<bool> {
        let mut db = self.db()?;
        if db.get_category(user_id, name)?.is_none() {
            return Err(missing_category(name));
        }
        Ok(db.move_category(user_id, name, direction)?)
    }

    pub fn remove(&self, user_id: &str, name: &str) -> Result<()> {
        let mut db = self.db()?;
        if !db.remove_category(user_id, name)? {
            return Err(missing_category(name));
        }
        Ok(())
    }
}
