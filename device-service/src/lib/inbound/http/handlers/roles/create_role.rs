use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::RoleData;
use super::RoleRequest;
use crate::domain::role::errors::RoleError;
use crate::domain::role::models::RoleName;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_role(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    body: Result<Json<RoleRequest>, JsonRejection>,
) -> Result<ApiSuccess<RoleData>, ApiError> {
    let Json(body) = body?;
    let name = RoleName::new(body.name).map_err(RoleError::from)?;

    state
        .role_service
        .create_role(name, caller.actor())
        .await
        .map_err(ApiError::from)
        .map(|ref role| ApiSuccess::new(StatusCode::OK, "Role created successfully", role.into()))
}
