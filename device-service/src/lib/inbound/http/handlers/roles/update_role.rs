use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::RoleData;
use super::RoleRequest;
use crate::domain::role::errors::RoleError;
use crate::domain::role::models::RoleId;
use crate::domain::role::models::RoleName;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_role(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(role_id): Path<String>,
    body: Result<Json<RoleRequest>, JsonRejection>,
) -> Result<ApiSuccess<RoleData>, ApiError> {
    let role_id = RoleId::from_string(&role_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let Json(body) = body?;
    let name = RoleName::new(body.name).map_err(RoleError::from)?;

    state
        .role_service
        .update_role(role_id, name, caller.actor())
        .await
        .map_err(ApiError::from)
        .map(|ref role| ApiSuccess::new(StatusCode::OK, "Role updated successfully", role.into()))
}
