pub mod app;
pub mod config;
pub mod error;
pub mod report;
pub mod services;
pub mod startup;
pub mod util;

pub use app::{AppConfig, AppState};
pub use config::YearParams;
pub use error::{AppError, Result};
pub use meter_db::{Category, MoveDirection};
pub use report::{CategoryReport, format_report, format_yearly};
pub use services::{AppServices, ImportIssue, ImportRow, ImportStats, SettingsSnapshot};
pub use startup::{AppPaths, ensure_app_data_dir};
pub use util::time::{parse_reading_date, resolve_years};
