//! Authentication middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::{RepositoryProvider, UserRepository};
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig};
use crate::interfaces::http::common::ErrorBody;

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    UserNotFound,
    InsufficientPermissions,
}

/// Authentication state containing JWT config and storage
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    pub repos: Arc<dyn RepositoryProvider>,
}

/// The user a valid token resolved to, attached to request extensions.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub username: String,
    pub role: String,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware
///
/// The token's subject is re-resolved against the user store on every
/// request; a token for a deleted user is refused.
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let claims = match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => claims,
        Err(_) => return auth_error_response(AuthError::InvalidToken),
    };

    let user = match auth_state.repos.users().find_by_id(&claims.sub).await {
        Ok(Some(user)) => user,
        _ => return auth_error_response(AuthError::UserNotFound),
    };

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
        role: user.role.as_str().to_string(),
    });
    next.run(request).await
}

/// Admin-only guard, layered inside `auth_middleware`.
pub async fn admin_middleware(request: Request<Body>, next: Next) -> Response {
    match request.extensions().get::<AuthenticatedUser>() {
        Some(user) if user.is_admin() => next.run(request).await,
        Some(_) => auth_error_response(AuthError::InsufficientPermissions),
        None => auth_error_response(AuthError::MissingToken),
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authentication token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
        AuthError::UserNotFound => (StatusCode::UNAUTHORIZED, "Invalid authentication token"),
        AuthError::InsufficientPermissions => (StatusCode::FORBIDDEN, "Insufficient permissions"),
    };

    (status, Json(ErrorBody::new(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State as AxumState;
    use axum::http::Request;
    use axum::middleware::from_fn_with_state;
    use axum::routing::post;
    use axum::Router;
    use tower::ServiceExt;

    use crate::domain::{Car, CarRepository, User, UserRole};
    use crate::infrastructure::crypto::jwt::create_token;
    use crate::infrastructure::memory::InMemoryRepositoryProvider;

    fn jwt_config() -> JwtConfig {
        JwtConfig::new("test-secret", 1)
    }

    // The guarded handler writes a car so the tests can observe whether a
    // rejected request had any effect.
    async fn guarded_create_car(
        AxumState(repos): AxumState<Arc<InMemoryRepositoryProvider>>,
    ) -> StatusCode {
        repos
            .cars()
            .save(Car::new("RAD 123 A", "Alice", "a@example.com"))
            .await
            .unwrap();
        StatusCode::CREATED
    }

    fn app(repos: Arc<InMemoryRepositoryProvider>) -> Router {
        let auth_state = AuthState {
            jwt_config: jwt_config(),
            repos: repos.clone(),
        };
        Router::new()
            .route("/cars", post(guarded_create_car))
            .layer(from_fn_with_state(auth_state, auth_middleware))
            .with_state(repos)
    }

    fn request(auth_header: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("POST").uri("/cars");
        if let Some(value) = auth_header {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn seed_user(repos: &InMemoryRepositoryProvider) -> User {
        repos
            .users()
            .save(User::new("alice", "hash", UserRole::Staff))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn missing_header_is_401_with_no_side_effects() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        seed_user(&repos).await;

        let resp = app(repos.clone()).oneshot(request(None)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(repos.cars().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_token_is_401_with_no_side_effects() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        seed_user(&repos).await;

        let resp = app(repos.clone())
            .oneshot(request(Some("Bearer not-a-jwt")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(repos.cars().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn token_for_a_deleted_user_is_401_with_no_side_effects() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let token = create_token("gone-user-id", "ghost", &jwt_config()).unwrap();

        let resp = app(repos.clone())
            .oneshot(request(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(repos.cars().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn valid_token_reaches_the_handler() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let user = seed_user(&repos).await;
        let token = create_token(&user.id, &user.username, &jwt_config()).unwrap();

        let resp = app(repos.clone())
            .oneshot(request(Some(&format!("Bearer {token}"))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(repos.cars().find_all().await.unwrap().len(), 1);
    }
}
