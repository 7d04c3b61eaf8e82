//! Parking slot management handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::dto::{CreateSlotRequest, SetSlotStatusRequest, SlotDto, UpdateSlotRequest};
use crate::domain::{
    DomainError, ParkingSlot, ParkingSlotRepository, RepositoryProvider, SlotStatus,
};
use crate::interfaces::http::common::{ApiError, ApiResult, ErrorBody, ValidatedJson};

/// Parking slot handler state
#[derive(Clone)]
pub struct SlotHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

fn slot_not_found(slot_number: &str) -> ApiError {
    ApiError(DomainError::NotFound {
        entity: "ParkingSlot",
        field: "slotNumber",
        value: slot_number.to_string(),
    })
}

fn parse_status(value: &str) -> Result<SlotStatus, ApiError> {
    SlotStatus::parse(value).ok_or_else(|| {
        ApiError(DomainError::Validation(format!(
            "status must be \"Available\" or \"Occupied\", got \"{value}\""
        )))
    })
}

#[utoipa::path(
    post,
    path = "/parking-slots",
    tag = "Parking Slots",
    security(("bearer_auth" = [])),
    request_body = CreateSlotRequest,
    responses(
        (status = 201, description = "Slot created", body = SlotDto),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 409, description = "Slot already exists", body = ErrorBody)
    )
)]
pub async fn create_slot(
    State(state): State<SlotHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateSlotRequest>,
) -> ApiResult<(StatusCode, Json<SlotDto>)> {
    let slot = ParkingSlot::new(request.slot_number.trim(), request.location);
    if slot.slot_number.is_empty() {
        return Err(ApiError(DomainError::Validation(
            "slotNumber is required".to_string(),
        )));
    }
    let saved = state.repos.parking_slots().save(slot).await?;
    Ok((StatusCode::CREATED, Json(SlotDto::from(saved))))
}

#[utoipa::path(
    get,
    path = "/parking-slots",
    tag = "Parking Slots",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All parking slots", body = [SlotDto])
    )
)]
pub async fn list_slots(State(state): State<SlotHandlerState>) -> ApiResult<Json<Vec<SlotDto>>> {
    let slots = state.repos.parking_slots().find_all().await?;
    Ok(Json(slots.into_iter().map(SlotDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/parking-slots/{slotNumber}",
    tag = "Parking Slots",
    security(("bearer_auth" = [])),
    params(("slotNumber" = String, Path, description = "Slot number")),
    responses(
        (status = 200, description = "Slot details", body = SlotDto),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_slot(
    State(state): State<SlotHandlerState>,
    Path(slot_number): Path<String>,
) -> ApiResult<Json<SlotDto>> {
    let slot = state
        .repos
        .parking_slots()
        .find_by_number(&slot_number)
        .await?
        .ok_or_else(|| slot_not_found(&slot_number))?;
    Ok(Json(SlotDto::from(slot)))
}

#[utoipa::path(
    put,
    path = "/parking-slots/{slotNumber}",
    tag = "Parking Slots",
    security(("bearer_auth" = [])),
    params(("slotNumber" = String, Path, description = "Slot number")),
    request_body = UpdateSlotRequest,
    responses(
        (status = 200, description = "Updated slot", body = SlotDto),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn update_slot(
    State(state): State<SlotHandlerState>,
    Path(slot_number): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateSlotRequest>,
) -> ApiResult<Json<SlotDto>> {
    let mut slot = state
        .repos
        .parking_slots()
        .find_by_number(&slot_number)
        .await?
        .ok_or_else(|| slot_not_found(&slot_number))?;

    if let Some(location) = request.location {
        slot.location = Some(location);
    }
    if let Some(status) = request.status.as_deref() {
        slot.status = parse_status(status)?;
    }
    slot.updated_at = Utc::now();

    state.repos.parking_slots().update(slot.clone()).await?;
    Ok(Json(SlotDto::from(slot)))
}

#[utoipa::path(
    put,
    path = "/parking-slots/{slotNumber}/status",
    tag = "Parking Slots",
    security(("bearer_auth" = [])),
    params(("slotNumber" = String, Path, description = "Slot number")),
    request_body = SetSlotStatusRequest,
    responses(
        (status = 200, description = "Updated slot", body = SlotDto),
        (status = 400, description = "Unknown status value", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn set_slot_status(
    State(state): State<SlotHandlerState>,
    Path(slot_number): Path<String>,
    Json(request): Json<SetSlotStatusRequest>,
) -> ApiResult<Json<SlotDto>> {
    let status = parse_status(&request.status)?;
    let slot = state
        .repos
        .parking_slots()
        .set_status(&slot_number, status)
        .await?;
    Ok(Json(SlotDto::from(slot)))
}

#[utoipa::path(
    delete,
    path = "/parking-slots/{slotNumber}",
    tag = "Parking Slots",
    security(("bearer_auth" = [])),
    params(("slotNumber" = String, Path, description = "Slot number")),
    responses(
        (status = 204, description = "Slot deleted"),
        (status = 403, description = "Admin only", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn delete_slot(
    State(state): State<SlotHandlerState>,
    Path(slot_number): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .repos
        .parking_slots()
        .find_by_number(&slot_number)
        .await?
        .ok_or_else(|| slot_not_found(&slot_number))?;

    state
        .repos
        .parking_slots()
        .delete_by_number(&slot_number)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
