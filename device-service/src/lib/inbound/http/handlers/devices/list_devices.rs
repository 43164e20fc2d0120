use axum::extract::State;
use axum::http::StatusCode;

use super::DeviceData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_devices(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<DeviceData>>, ApiError> {
    state
        .device_service
        .list_devices()
        .await
        .map_err(ApiError::from)
        .map(|devices| {
            ApiSuccess::new(
                StatusCode::OK,
                "Devices retrieved successfully",
                devices.iter().map(DeviceData::from).collect(),
            )
        })
}
