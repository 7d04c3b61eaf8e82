//! Revenue report handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;

use super::dto::{DailyReportParams, MonthlyReportParams};
use crate::application::{Report, ReportService};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiError, ApiResult, ErrorBody};

/// Report handler state
#[derive(Clone)]
pub struct ReportHandlerState {
    pub reports: Arc<ReportService>,
}

/// Raw query shape so missing/invalid params reject with the standard
/// error body instead of axum's plain-text 400.
#[derive(Debug, serde::Deserialize)]
pub struct RawDailyParams {
    pub date: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct RawMonthlyParams {
    pub year: Option<String>,
    pub month: Option<String>,
}

#[utoipa::path(
    get,
    path = "/reports/daily",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(DailyReportParams),
    responses(
        (status = 200, description = "Completed sessions that entered on the given day", body = Report),
        (status = 400, description = "Missing or invalid date", body = ErrorBody)
    )
)]
pub async fn daily_report(
    State(state): State<ReportHandlerState>,
    Query(params): Query<RawDailyParams>,
) -> ApiResult<Json<Report>> {
    let raw = params.date.ok_or_else(|| {
        ApiError(DomainError::Validation("date is required".to_string()))
    })?;
    let date: NaiveDate = raw.parse().map_err(|_| {
        ApiError(DomainError::Validation(format!(
            "invalid date: {raw} (expected YYYY-MM-DD)"
        )))
    })?;

    let report = state.reports.daily(date).await?;
    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/reports/monthly",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(MonthlyReportParams),
    responses(
        (status = 200, description = "Completed sessions that entered in the given month", body = Report),
        (status = 400, description = "Missing or invalid year/month", body = ErrorBody)
    )
)]
pub async fn monthly_report(
    State(state): State<ReportHandlerState>,
    Query(params): Query<RawMonthlyParams>,
) -> ApiResult<Json<Report>> {
    let year: i32 = params
        .year
        .as_deref()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| {
            ApiError(DomainError::Validation(
                "year is required and must be a number".to_string(),
            ))
        })?;
    let month: u32 = params
        .month
        .as_deref()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| {
            ApiError(DomainError::Validation(
                "month is required and must be a number".to_string(),
            ))
        })?;

    let report = state.reports.monthly(year, month).await?;
    Ok(Json(report))
}
