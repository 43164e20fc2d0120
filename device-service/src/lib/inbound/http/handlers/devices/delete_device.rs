use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_device_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_device(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(device_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let device_id = parse_device_id(&device_id)?;

    state
        .device_service
        .delete_device(device_id, caller.actor())
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, "Device deleted successfully", ()))
}
