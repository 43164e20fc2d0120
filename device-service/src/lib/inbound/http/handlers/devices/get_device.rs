use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_device_id;
use super::DeviceData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_device(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<ApiSuccess<DeviceData>, ApiError> {
    let device_id = parse_device_id(&device_id)?;

    state
        .device_service
        .get_device(device_id)
        .await
        .map_err(ApiError::from)
        .map(|ref device| {
            ApiSuccess::new(StatusCode::OK, "Device retrieved successfully", device.into())
        })
}
