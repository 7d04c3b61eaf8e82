//! Car management handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::dto::{CarDto, CreateCarRequest, UpdateCarRequest};
use crate::domain::{Car, CarRepository, DomainError, RepositoryProvider};
use crate::interfaces::http::common::{ApiError, ApiResult, ErrorBody, ValidatedJson};

/// Car handler state
#[derive(Clone)]
pub struct CarHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
}

fn car_not_found(plate_number: &str) -> ApiError {
    ApiError(DomainError::NotFound {
        entity: "Car",
        field: "plateNumber",
        value: plate_number.to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/cars",
    tag = "Cars",
    security(("bearer_auth" = [])),
    request_body = CreateCarRequest,
    responses(
        (status = 201, description = "Car registered", body = CarDto),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 409, description = "Plate already registered", body = ErrorBody)
    )
)]
pub async fn create_car(
    State(state): State<CarHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateCarRequest>,
) -> ApiResult<(StatusCode, Json<CarDto>)> {
    let car = Car::new(request.plate_number, request.owner_name, request.contact_info);
    if car.plate_number.is_empty() {
        return Err(ApiError(DomainError::Validation(
            "plateNumber is required".to_string(),
        )));
    }
    let saved = state.repos.cars().save(car).await?;
    Ok((StatusCode::CREATED, Json(CarDto::from(saved))))
}

#[utoipa::path(
    get,
    path = "/cars",
    tag = "Cars",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All registered cars", body = [CarDto])
    )
)]
pub async fn list_cars(State(state): State<CarHandlerState>) -> ApiResult<Json<Vec<CarDto>>> {
    let cars = state.repos.cars().find_all().await?;
    Ok(Json(cars.into_iter().map(CarDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/cars/{plateNumber}",
    tag = "Cars",
    security(("bearer_auth" = [])),
    params(("plateNumber" = String, Path, description = "Plate number")),
    responses(
        (status = 200, description = "Car details", body = CarDto),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_car(
    State(state): State<CarHandlerState>,
    Path(plate_number): Path<String>,
) -> ApiResult<Json<CarDto>> {
    let car = state
        .repos
        .cars()
        .find_by_plate(&plate_number)
        .await?
        .ok_or_else(|| car_not_found(&plate_number))?;
    Ok(Json(CarDto::from(car)))
}

#[utoipa::path(
    put,
    path = "/cars/{plateNumber}",
    tag = "Cars",
    security(("bearer_auth" = [])),
    params(("plateNumber" = String, Path, description = "Plate number")),
    request_body = UpdateCarRequest,
    responses(
        (status = 200, description = "Updated car", body = CarDto),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn update_car(
    State(state): State<CarHandlerState>,
    Path(plate_number): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateCarRequest>,
) -> ApiResult<Json<CarDto>> {
    let mut car = state
        .repos
        .cars()
        .find_by_plate(&plate_number)
        .await?
        .ok_or_else(|| car_not_found(&plate_number))?;

    if let Some(owner_name) = request.owner_name {
        car.owner_name = owner_name.trim().to_string();
    }
    if let Some(contact_info) = request.contact_info {
        car.contact_info = contact_info.trim().to_string();
    }
    car.updated_at = Utc::now();

    state.repos.cars().update(car.clone()).await?;
    Ok(Json(CarDto::from(car)))
}

#[utoipa::path(
    delete,
    path = "/cars/{plateNumber}",
    tag = "Cars",
    security(("bearer_auth" = [])),
    params(("plateNumber" = String, Path, description = "Plate number")),
    responses(
        (status = 204, description = "Car deleted"),
        (status = 403, description = "Admin only", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn delete_car(
    State(state): State<CarHandlerState>,
    Path(plate_number): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .repos
        .cars()
        .find_by_plate(&plate_number)
        .await?
        .ok_or_else(|| car_not_found(&plate_number))?;

    state.repos.cars().delete_by_plate(&plate_number).await?;
    Ok(StatusCode::NO_CONTENT)
}
