//! Payment handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{TimeZone, Utc};

use super::dto::{CreatePaymentRequest, PaymentDto, PaymentRangeParams};
use crate::application::{SessionService, SettlePayment};
use crate::domain::{DomainError, PaymentRepository, RepositoryProvider};
use crate::interfaces::http::common::{ApiError, ApiResult, ErrorBody, ValidatedJson};
use crate::interfaces::http::modules::parking_records::handlers::parse_payment_method;

/// Payment handler state
#[derive(Clone)]
pub struct PaymentHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub sessions: Arc<SessionService>,
}

#[utoipa::path(
    post,
    path = "/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentDto),
        (status = 404, description = "Record not found", body = ErrorBody),
        (status = 409, description = "Record already paid", body = ErrorBody)
    )
)]
pub async fn create_payment(
    State(state): State<PaymentHandlerState>,
    ValidatedJson(request): ValidatedJson<CreatePaymentRequest>,
) -> ApiResult<(StatusCode, Json<PaymentDto>)> {
    let payment_method = parse_payment_method(request.payment_method.as_deref())?;
    let payment = state
        .sessions
        .record_payment(SettlePayment {
            record_id: request.record_id,
            payment_method,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(PaymentDto::from(payment))))
}

#[utoipa::path(
    get,
    path = "/payments/all",
    tag = "Payments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All payments, newest first", body = [PaymentDto])
    )
)]
pub async fn list_payments(
    State(state): State<PaymentHandlerState>,
) -> ApiResult<Json<Vec<PaymentDto>>> {
    let payments = state.repos.payments().find_all().await?;
    Ok(Json(payments.into_iter().map(PaymentDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/payments/range",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(PaymentRangeParams),
    responses(
        (status = 200, description = "Payments in the date range", body = [PaymentDto]),
        (status = 400, description = "Missing or invalid dates", body = ErrorBody)
    )
)]
pub async fn list_payments_in_range(
    State(state): State<PaymentHandlerState>,
    Query(params): Query<PaymentRangeParams>,
) -> ApiResult<Json<Vec<PaymentDto>>> {
    let (start_date, end_date) = params
        .parse()
        .map_err(|msg| ApiError(DomainError::Validation(msg)))?;
    if end_date < start_date {
        return Err(ApiError(DomainError::Validation(
            "endDate must not be before startDate".to_string(),
        )));
    }

    let start = Utc.from_utc_datetime(
        &start_date.and_hms_opt(0, 0, 0).expect("midnight is valid"),
    );
    // End of the last day, inclusive.
    let end = Utc.from_utc_datetime(
        &end_date
            .and_hms_milli_opt(23, 59, 59, 999)
            .expect("end of day is valid"),
    );

    let payments = state.repos.payments().find_in_range(start, end).await?;
    Ok(Json(payments.into_iter().map(PaymentDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/payments/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment details", body = PaymentDto),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_payment(
    State(state): State<PaymentHandlerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PaymentDto>> {
    let payment = state
        .repos
        .payments()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| {
            ApiError(DomainError::NotFound {
                entity: "Payment",
                field: "id",
                value: id.clone(),
            })
        })?;
    Ok(Json(PaymentDto::from(payment)))
}
