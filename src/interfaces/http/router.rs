//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{ReportService, SessionService};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::middleware::{admin_middleware, auth_middleware, AuthState};

use super::common::ErrorBody;
use super::modules::{auth, cars, health, parking_records, parking_slots, payments, reports};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::register,
        auth::login,
        auth::get_current_user,
        // Cars
        cars::create_car,
        cars::list_cars,
        cars::get_car,
        cars::update_car,
        cars::delete_car,
        // Parking slots
        parking_slots::create_slot,
        parking_slots::list_slots,
        parking_slots::get_slot,
        parking_slots::update_slot,
        parking_slots::set_slot_status,
        parking_slots::delete_slot,
        // Parking records
        parking_records::open_record,
        parking_records::list_records,
        parking_records::completed_sessions_report,
        parking_records::get_record,
        parking_records::close_record,
        parking_records::delete_record,
        // Payments
        payments::create_payment,
        payments::list_payments,
        payments::list_payments_in_range,
        payments::get_payment,
        // Reports
        reports::daily_report,
        reports::monthly_report,
    ),
    components(
        schemas(
            ErrorBody,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
            // Auth
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            // Cars
            cars::CreateCarRequest,
            cars::UpdateCarRequest,
            cars::CarDto,
            // Parking slots
            parking_slots::CreateSlotRequest,
            parking_slots::UpdateSlotRequest,
            parking_slots::SetSlotStatusRequest,
            parking_slots::SlotDto,
            // Parking records
            parking_records::OpenRecordRequest,
            parking_records::CloseRecordRequest,
            parking_records::RecordDto,
            parking_records::ClosedRecordDto,
            // Payments
            payments::CreatePaymentRequest,
            payments::PaymentDto,
            // Reports
            crate::application::Report,
            crate::application::ReportEntry,
            crate::application::ReportSummary,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "User registration, login (JWT) and current-user lookup"),
        (name = "Cars", description = "Registered vehicle management"),
        (name = "Parking Slots", description = "Parking slot management and status transitions"),
        (name = "Parking Records", description = "Parking session lifecycle: entry, billing, exit"),
        (name = "Payments", description = "Payment settlement and queries"),
        (name = "Reports", description = "Daily and monthly revenue reports"),
    ),
    info(
        title = "Parklot API",
        version = "1.0.0",
        description = "REST API for parking lot management: cars, slots, sessions, payments and reports",
        license(name = "MIT"),
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    sessions: Arc<SessionService>,
    reports_service: Arc<ReportService>,
    db: DatabaseConnection,
    jwt_config: JwtConfig,
) -> Router {
    let auth_state = AuthState {
        jwt_config: jwt_config.clone(),
        repos: repos.clone(),
    };
    let require_auth =
        middleware::from_fn_with_state(auth_state.clone(), auth_middleware);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let health_state = health::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    // Auth routes (public)
    let auth_handler_state = auth::AuthHandlerState {
        repos: repos.clone(),
        jwt_config,
    };
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .with_state(auth_handler_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .layer(require_auth.clone())
        .with_state(auth_handler_state);

    // Car routes (protected; delete is admin-only)
    let car_state = cars::CarHandlerState {
        repos: repos.clone(),
    };
    let car_routes = Router::new()
        .route("/", get(cars::list_cars).post(cars::create_car))
        .route("/{plateNumber}", get(cars::get_car).put(cars::update_car))
        .layer(require_auth.clone())
        .with_state(car_state.clone());
    let car_admin_routes = Router::new()
        .route("/{plateNumber}", delete(cars::delete_car))
        .layer(middleware::from_fn(admin_middleware))
        .layer(require_auth.clone())
        .with_state(car_state);

    // Parking slot routes (protected; delete is admin-only)
    let slot_state = parking_slots::SlotHandlerState {
        repos: repos.clone(),
    };
    let slot_routes = Router::new()
        .route(
            "/",
            get(parking_slots::list_slots).post(parking_slots::create_slot),
        )
        .route(
            "/{slotNumber}",
            get(parking_slots::get_slot).put(parking_slots::update_slot),
        )
        .route(
            "/{slotNumber}/status",
            put(parking_slots::set_slot_status),
        )
        .layer(require_auth.clone())
        .with_state(slot_state.clone());
    let slot_admin_routes = Router::new()
        .route("/{slotNumber}", delete(parking_slots::delete_slot))
        .layer(middleware::from_fn(admin_middleware))
        .layer(require_auth.clone())
        .with_state(slot_state);

    // Parking record routes (protected)
    let record_state = parking_records::RecordHandlerState {
        repos: repos.clone(),
        sessions: sessions.clone(),
        reports: reports_service.clone(),
    };
    let record_routes = Router::new()
        .route(
            "/",
            get(parking_records::list_records).post(parking_records::open_record),
        )
        .route(
            "/report",
            get(parking_records::completed_sessions_report),
        )
        .route(
            "/{id}",
            get(parking_records::get_record)
                .put(parking_records::close_record)
                .delete(parking_records::delete_record),
        )
        .layer(require_auth.clone())
        .with_state(record_state);

    // Payment routes (protected)
    let payment_state = payments::PaymentHandlerState {
        repos: repos.clone(),
        sessions,
    };
    let payment_routes = Router::new()
        .route("/", post(payments::create_payment))
        .route("/all", get(payments::list_payments))
        .route("/range", get(payments::list_payments_in_range))
        .route("/{id}", get(payments::get_payment))
        .layer(require_auth.clone())
        .with_state(payment_state);

    // Report routes (protected)
    let report_state = reports::ReportHandlerState {
        reports: reports_service,
    };
    let report_routes = Router::new()
        .route("/daily", get(reports::daily_report))
        .route("/monthly", get(reports::monthly_report))
        .layer(require_auth)
        .with_state(report_state);

    Router::new()
        .merge(health_routes)
        .nest("/auth", auth_routes.merge(auth_protected_routes))
        .nest("/cars", car_routes.merge(car_admin_routes))
        .nest("/parking-slots", slot_routes.merge(slot_admin_routes))
        .nest("/parking-records", record_routes)
        .nest("/payments", payment_routes)
        .nest("/reports", report_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
