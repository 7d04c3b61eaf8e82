//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use crate::domain::{DomainError, RepositoryProvider, User, UserRepository, UserRole};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::interfaces::http::common::{ApiError, ApiResult, ErrorBody, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Auth handler state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
}

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserInfo),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 409, description = "Username already exists", body = ErrorBody)
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserInfo>)> {
    let password_hash = hash_password(&request.password)
        .map_err(|e| ApiError(DomainError::Storage(e.to_string())))?;

    // Registration is open, so every new account starts as staff.
    // Admins are seeded from config at startup.
    let user = state
        .repos
        .users()
        .save(User::new(request.username, password_hash, UserRole::default()))
        .await?;

    Ok((StatusCode::CREATED, Json(UserInfo::from(user))))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = state
        .repos
        .users()
        .find_by_username(&request.username)
        .await?
        .ok_or_else(|| ApiError(DomainError::Unauthorized("Invalid credentials".to_string())))?;

    let password_valid = verify_password(&request.password, &user.password_hash).unwrap_or(false);
    if !password_valid {
        return Err(ApiError(DomainError::Unauthorized(
            "Invalid credentials".to_string(),
        )));
    }

    let token = create_token(&user.id, &user.username, &state.jwt_config)
        .map_err(|e| ApiError(DomainError::Storage(e.to_string())))?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_hours * 3600,
        user: UserInfo::from(user),
    }))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserInfo),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    )
)]
pub async fn get_current_user(
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<UserInfo> {
    Json(UserInfo {
        id: user.user_id,
        username: user.username,
        role: user.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use tower::ServiceExt;

    use crate::infrastructure::memory::InMemoryRepositoryProvider;

    fn app(repos: Arc<InMemoryRepositoryProvider>) -> Router {
        let state = AuthHandlerState {
            repos,
            jwt_config: JwtConfig::new("test-secret", 1),
        };
        Router::new()
            .route("/auth/register", post(register))
            .with_state(state)
    }

    fn register_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/auth/register")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn register_creates_a_staff_user() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let body = serde_json::json!({"username": "alice", "password": "secret1"});

        let resp = app(repos.clone()).oneshot(register_request(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let info: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(info["role"], "staff");
    }

    #[tokio::test]
    async fn register_ignores_a_role_field_in_the_body() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let body =
            serde_json::json!({"username": "mallory", "password": "secret1", "role": "admin"});

        let resp = app(repos.clone()).oneshot(register_request(body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let stored = repos
            .users()
            .find_by_username("mallory")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.role, UserRole::Staff);
        assert!(!stored.is_admin());
    }
}
