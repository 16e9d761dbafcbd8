use meter_core::{
    MonthlyBucket, Trend, YearRange, YearRow, YearlyStat, build_intervals, filter_monthly,
    filter_yearly, linear_trend, monthly_from_series, year_over_year, yearly_from_series,
};
use meter_db::{Category, Db};

use crate::error::Result;
use crate::report::{CategoryReport, format_report};
use crate::services::{SharedConfig, open_db, require_category};

#[derive(Clone)]
pub struct AnalyticsService {
    config: SharedConfig,
}

impl AnalyticsService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn db(&self) -> Result<Db> {
        open_db(&self.config)
    }

    pub fn category_report(
        &self,
        user_id: &str,
        category: &str,
        years: YearRange,
    ) -> Result<CategoryReport> {
        let db = self.db()?;
        let category = require_category(&db, user_id, category)?;
        build_report(&db, user_id, category, years)
    }

    pub fn monthly(
        &self,
        user_id: &str,
        category: &str,
        years: YearRange,
    ) -> Result<Vec<MonthlyBucket>> {
        Ok(self.category_report(user_id, category, years)?.monthly)
    }

    pub fn yearly(&self, user_id: &str, category: &str, years: YearRange) -> Result<Vec<YearlyStat>> {
        Ok(self.category_report(user_id, category, years)?.yearly)
    }

    pub fn year_over_year(
        &self,
        user_id: &str,
        category: &str,
        years: YearRange,
    ) -> Result<Vec<YearRow>> {
        let monthly = self.monthly(user_id, category, years)?;
        Ok(year_over_year(&monthly))
    }

    pub fn trend(&self, user_id: &str, category: &str, years: YearRange) -> Result<Option<Trend>> {
        let monthly = self.monthly(user_id, category, years)?;
        Ok(linear_trend(&monthly))
    }

    /// Reports for every category of the user that has monthly data, in display order.
    pub fn overview(&self, user_id: &str, years: YearRange) -> Result<Vec<CategoryReport>> {
        let db = self.db()?;
        let mut reports = Vec::new();
        for category in db.list_categories(user_id)? {
            let report = build_report(&db, user_id, category, years)?;
            if report.monthly.is_empty() {
                continue;
            }
            reports.push(report);
        }
        Ok(reports)
    }

    pub fn report_text(&self, user_id: &str, years: YearRange) -> Result<String> {
        let reports = self.overview(user_id, years)?;
        Ok(format_report(&reports))
    }
}

fn build_report(
    db: &Db,
    user_id: &str,
    category: Category,
    years: YearRange,
) -> Result<CategoryReport> {
    let samples = db.list_readings(user_id, &category.name)?;
    let series = build_intervals(&samples)?;
    let monthly = monthly_from_series(&series, category.config.mode);
    // Yearly stats need the full monthly series; the year filter applies to the output only.
    let yearly = yearly_from_series(&series, &monthly);
    Ok(CategoryReport {
        category: category.name,
        title: category.title,
        config: category.config,
        monthly: filter_monthly(&monthly, years),
        yearly: filter_yearly(&yearly, years),
    })
}
