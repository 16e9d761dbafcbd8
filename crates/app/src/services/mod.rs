mod analytics;
mod categories;
mod readings;
mod settings;

use std::sync::Arc;

use crate::app::AppConfig;
use crate::error::{AppError, Result};
use meter_db::{Category, Db};

pub use analytics::AnalyticsService;
pub use categories::CategoriesService;
pub use readings::{ImportIssue, ImportRow, ImportStats, ReadingsService};
pub use settings::{SettingsService, SettingsSnapshot};

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub analytics: AnalyticsService,
    pub categories: CategoriesService,
    pub readings: ReadingsService,
    pub settings: SettingsService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        Self {
            analytics: AnalyticsService::new(shared.clone()),
            categories: CategoriesService::new(shared.clone()),
            readings: ReadingsService::new(shared.clone()),
            settings: SettingsService::new(shared),
        }
    }
}

fn open_db(config: &SharedConfig) -> Result<Db> {
    Ok(Db::open(&config.db_path)?)
}

fn require_category(db: &Db, user_id: &str, name: &str) -> Result<Category> {
    db.get_category(user_id, name)?
        .ok_or_else(|| missing_category(name))
}

fn missing_category(name: &str) -> AppError {
    AppError::NotFound(format!("category not found: {}", name))
}
