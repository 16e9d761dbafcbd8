use serde::{Deserialize, Serialize};

/// Year filter as supplied by a frontend, validated by `resolve_years`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct YearParams {
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,
}
