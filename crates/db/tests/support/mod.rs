#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use meter_core::{CategoryConfig, EvaluationMode, Sample};
use meter_db::Db;
use tempfile::TempDir;

pub const USER: &str = "user-1";

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.sqlite");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn sample(year: i32, month: u32, day: u32, value: f64) -> Sample {
    Sample::new(date(year, month, day), value)
}

pub fn config(unit: &str, mode: EvaluationMode) -> CategoryConfig {
    CategoryConfig {
        unit: unit.to_string(),
        mode,
    }
}

pub fn add_categories(db: &Db, names: &[&str]) {
    for name in names {
        let added = db
            .add_category(USER, name, &CategoryConfig::default(), None)
            .expect("add category");
        assert!(added, "category {name} should be new");
    }
}

pub fn category_names(db: &Db) -> Vec<String> {
    db.list_categories(USER)
        .expect("list categories")
        .into_iter()
        .map(|category| category.name)
        .collect()
}
