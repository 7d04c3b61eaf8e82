//! Report query parameters

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct DailyReportParams {
    /// Day to report on, YYYY-MM-DD
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthlyReportParams {
    pub year: i32,
    /// 1-12
    pub month: u32,
}
