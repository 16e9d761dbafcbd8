use chrono::NaiveDate;
use meter_core::YearRange;

use crate::config::YearParams;
use crate::error::{AppError, Result};

pub fn resolve_years(params: &YearParams) -> Result<YearRange> {
    if let (Some(from), Some(to)) = (params.from_year, params.to_year)
        && from > to
    {
        return Err(AppError::InvalidInput(format!(
            "invalid year range {}..{}",
            from, to
        )));
    }
    Ok(YearRange::new(params.from_year, params.to_year))
}

pub fn parse_reading_date(value: &str) -> Result<NaiveDate> {
    meter_db::parse_date(value)
        .map_err(|err| AppError::InvalidInput(format!("invalid date {:?}: {}", value, err)))
}
