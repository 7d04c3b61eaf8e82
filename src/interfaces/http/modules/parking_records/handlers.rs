//! Parking record (session) handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CloseRecordRequest, ClosedRecordDto, OpenRecordRequest, RecordDto};
use crate::application::{CloseSession, OpenSession, Report, ReportService, SessionService};
use crate::domain::{DomainError, ParkingRecordRepository, PaymentMethod, RepositoryProvider};
use crate::interfaces::http::common::{ApiError, ApiResult, ErrorBody, ValidatedJson};

/// Parking record handler state
#[derive(Clone)]
pub struct RecordHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub sessions: Arc<SessionService>,
    pub reports: Arc<ReportService>,
}

pub(crate) fn parse_payment_method(value: Option<&str>) -> Result<PaymentMethod, ApiError> {
    match value {
        None => Ok(PaymentMethod::default()),
        Some(raw) => PaymentMethod::parse(raw).ok_or_else(|| {
            ApiError(DomainError::Validation(format!(
                "unknown payment method: {raw}"
            )))
        }),
    }
}

#[utoipa::path(
    post,
    path = "/parking-records",
    tag = "Parking Records",
    security(("bearer_auth" = [])),
    request_body = OpenRecordRequest,
    responses(
        (status = 201, description = "Session opened", body = RecordDto),
        (status = 404, description = "Slot not found", body = ErrorBody),
        (status = 409, description = "Slot already occupied", body = ErrorBody)
    )
)]
pub async fn open_record(
    State(state): State<RecordHandlerState>,
    ValidatedJson(request): ValidatedJson<OpenRecordRequest>,
) -> ApiResult<(StatusCode, Json<RecordDto>)> {
    let record = state
        .sessions
        .open_session(OpenSession {
            plate_number: request.plate_number,
            slot_number: request.slot_number,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(RecordDto::from(record))))
}

#[utoipa::path(
    get,
    path = "/parking-records",
    tag = "Parking Records",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All records, newest entry first", body = [RecordDto])
    )
)]
pub async fn list_records(
    State(state): State<RecordHandlerState>,
) -> ApiResult<Json<Vec<RecordDto>>> {
    let records = state.repos.parking_records().find_all().await?;
    Ok(Json(records.into_iter().map(RecordDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/parking-records/report",
    tag = "Parking Records",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All completed sessions with summary", body = Report)
    )
)]
pub async fn completed_sessions_report(
    State(state): State<RecordHandlerState>,
) -> ApiResult<Json<Report>> {
    let report = state.reports.completed_sessions().await?;
    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/parking-records/{id}",
    tag = "Parking Records",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Record ID")),
    responses(
        (status = 200, description = "Record details", body = RecordDto),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_record(
    State(state): State<RecordHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<RecordDto>> {
    let record = state
        .repos
        .parking_records()
        .find_by_id(id)
        .await?
        .ok_or(ApiError(DomainError::NotFound {
            entity: "ParkingRecord",
            field: "id",
            value: id.to_string(),
        }))?;
    Ok(Json(RecordDto::from(record)))
}

#[utoipa::path(
    put,
    path = "/parking-records/{id}",
    tag = "Parking Records",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Record ID")),
    request_body = CloseRecordRequest,
    responses(
        (status = 200, description = "Session closed and billed", body = ClosedRecordDto),
        (status = 404, description = "Not found", body = ErrorBody),
        (status = 409, description = "Already closed", body = ErrorBody)
    )
)]
pub async fn close_record(
    State(state): State<RecordHandlerState>,
    Path(id): Path<i32>,
    body: Option<Json<CloseRecordRequest>>,
) -> ApiResult<Json<ClosedRecordDto>> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let payment_method = parse_payment_method(request.payment_method.as_deref())?;

    let closed = state
        .sessions
        .close_session(CloseSession {
            record_id: id,
            payment_method,
        })
        .await?;
    Ok(Json(ClosedRecordDto::from(closed)))
}

#[utoipa::path(
    delete,
    path = "/parking-records/{id}",
    tag = "Parking Records",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Record ID")),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn delete_record(
    State(state): State<RecordHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.sessions.delete_session(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
