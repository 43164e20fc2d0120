use std::sync::Arc;
use std::time::Duration;

use auth::AllowedRoles;
use auth::RequestAuthorizer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::devices;
use super::handlers::roles;
use super::handlers::users;
use super::middleware::authorize;
use super::middleware::RoleGate;
use crate::domain::device::ports::DeviceServicePort;
use crate::domain::role::models::RoleName;
use crate::domain::role::ports::RoleServicePort;
use crate::domain::user::ports::UserServicePort;

pub const API_PREFIX: &str = "/api/v1";

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub role_service: Arc<dyn RoleServicePort>,
    pub device_service: Arc<dyn DeviceServicePort>,
}

/// Build the HTTP application.
///
/// Routes are grouped by allow-list; every group except the public one sits
/// behind its own role gate.
pub fn create_router(
    state: AppState,
    authorizer: Arc<RequestAuthorizer>,
    request_timeout: Duration,
) -> Router {
    let gate = |roles: &[&str]| {
        middleware::from_fn_with_state(
            RoleGate::new(Arc::clone(&authorizer), AllowedRoles::new(roles.iter().copied())),
            authorize,
        )
    };

    let public_routes = Router::new()
        .route("/user/register", post(users::register_user))
        .route("/user/login", post(users::login));

    let any_role_routes = Router::new()
        .route("/me", get(users::get_me))
        .route("/devices", get(devices::list_devices))
        .route("/devices/:id", get(devices::get_device))
        .route_layer(gate(&[
            RoleName::ADMIN,
            RoleName::TECHNICIAN,
            RoleName::VIEWER,
        ]));

    let technician_routes = Router::new()
        .route("/devices", post(devices::create_device))
        .route("/devices/:id", put(devices::update_device))
        .route_layer(gate(&[RoleName::ADMIN, RoleName::TECHNICIAN]));

    let admin_routes = Router::new()
        .route("/user/all", get(users::list_users))
        .route("/user/get/:id", get(users::get_user))
        .route("/user/update/:id", put(users::update_user))
        .route("/user/delete/:id", delete(users::delete_user))
        .route("/role", post(roles::create_role).get(roles::list_roles))
        .route(
            "/role/:id",
            get(roles::get_role)
                .put(roles::update_role)
                .delete(roles::delete_role),
        )
        .route("/devices/:id", delete(devices::delete_device))
        .route_layer(gate(&[RoleName::ADMIN]));

    let api_routes = Router::new()
        .merge(public_routes)
        .merge(any_role_routes)
        .merge(technician_routes)
        .merge(admin_routes);

    // Span fields exclude headers so bearer tokens never reach the log.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .nest(API_PREFIX, api_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
