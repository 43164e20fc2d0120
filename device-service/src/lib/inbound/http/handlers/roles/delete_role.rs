use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::role::models::RoleId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_role(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(role_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let role_id = RoleId::from_string(&role_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .role_service
        .delete_role(role_id, caller.actor())
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, "Role deleted successfully", ()))
}
