use crate::error::{AppError, Result};
use crate::services::{SharedConfig, open_db};

/// Snapshot of user-configurable settings stored in the DB.
#[derive(Debug, Clone)]
pub struct SettingsSnapshot {
    pub default_user: String,
}

#[derive(Clone)]
pub struct SettingsService {
    config: SharedConfig,
}

impl SettingsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    pub fn get(&self) -> Result<SettingsSnapshot> {
        let db = open_db(&self.config)?;
        Ok(SettingsSnapshot {
            default_user: db.get_default_user()?,
        })
    }

    pub fn update(&self, default_user: Option<&str>) -> Result<()> {
        let db = open_db(&self.config)?;
        if let Some(user) = default_user {
            let user = user.trim();
            if user.is_empty() {
                return Err(AppError::InvalidInput("user id must not be empty".to_string()));
            }
            db.set_default_user(user)?;
        }
        Ok(())
    }
}
