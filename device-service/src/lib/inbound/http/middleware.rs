use std::sync::Arc;

use auth::AllowedRoles;
use auth::RequestAuthorizer;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use crate::inbound::http::handlers::ApiError;

/// Identity admitted by the role gate, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Email carried by the token, if any
    pub email: Option<String>,
    pub role_name: String,
}

impl AuthenticatedUser {
    /// Identity recorded in audit columns.
    pub fn actor(&self) -> &str {
        self.email.as_deref().unwrap_or("unknown")
    }
}

/// Middleware state: the shared authorizer plus the allow-list of one
/// route group.
#[derive(Clone)]
pub struct RoleGate {
    authorizer: Arc<RequestAuthorizer>,
    allowed_roles: AllowedRoles,
}

impl RoleGate {
    pub fn new(authorizer: Arc<RequestAuthorizer>, allowed_roles: AllowedRoles) -> Self {
        Self {
            authorizer,
            allowed_roles,
        }
    }
}

/// Middleware that admits a request only when its bearer token carries one
/// of the group's roles.
pub async fn authorize(
    State(gate): State<RoleGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let principal = gate
        .authorizer
        .authorize(header, &gate.allowed_roles, Utc::now())
        .map_err(|e| {
            tracing::warn!(
                error = ?e,
                method = %req.method(),
                uri = %req.uri(),
                "Request rejected by role gate"
            );
            ApiError::from(e)
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        email: principal.identity,
        role_name: principal.role_name,
    });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use auth::TokenCodec;
    use auth::TokenConfig;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::middleware;
    use axum::routing::get;
    use axum::Extension;
    use axum::Router;
    use chrono::Duration;
    use tower::ServiceExt;

    use super::*;

    const SECRET: &str = "middleware-test-secret-at-least-32-bytes";

    fn codec() -> TokenCodec {
        TokenCodec::new(&TokenConfig::new(SECRET, Duration::hours(1)))
    }

    fn app() -> Router {
        let gate = RoleGate::new(
            Arc::new(RequestAuthorizer::new(codec())),
            AllowedRoles::new(["admin", "technician"]),
        );

        Router::new()
            .route(
                "/guarded",
                get(|Extension(user): Extension<AuthenticatedUser>| async move {
                    format!("{}:{}", user.actor(), user.role_name)
                }),
            )
            .route_layer(middleware::from_fn_with_state(gate, authorize))
    }

    async fn call(authorization: Option<String>) -> (StatusCode, String) {
        let mut builder = Request::builder().uri("/guarded");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }

        let response = app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn token(role_name: &str) -> String {
        codec()
            .issue("tech@x.com", role_name, Utc::now(), Duration::hours(1))
            .unwrap()
    }

    #[tokio::test]
    async fn test_allowed_role_reaches_handler_with_identity() {
        let (status, body) = call(Some(format!("Bearer {}", token("technician")))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "tech@x.com:technician");
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let (status, body) = call(None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Invalid token format"));
    }

    #[tokio::test]
    async fn test_disallowed_role_is_unauthorized() {
        let (status, body) = call(Some(format!("Bearer {}", token("viewer")))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("required role"));
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let expired = codec()
            .issue(
                "tech@x.com",
                "admin",
                Utc::now() - Duration::hours(2),
                Duration::hours(1),
            )
            .unwrap();

        let (status, body) = call(Some(format!("Bearer {}", expired))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("Token expired or invalid"));
    }

    #[test]
    fn test_actor_falls_back_when_identity_missing() {
        let user = AuthenticatedUser {
            email: None,
            role_name: "admin".to_string(),
        };
        assert_eq!(user.actor(), "unknown");
    }
}
