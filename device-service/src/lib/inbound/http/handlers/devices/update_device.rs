use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::parse_device_id;
use super::DeviceData;
use super::DeviceRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_device(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(device_id): Path<String>,
    body: Result<Json<DeviceRequest>, JsonRejection>,
) -> Result<ApiSuccess<DeviceData>, ApiError> {
    let device_id = parse_device_id(&device_id)?;
    let Json(body) = body?;

    state
        .device_service
        .update_device(device_id, body.try_into_details()?, caller.actor())
        .await
        .map_err(ApiError::from)
        .map(|ref device| {
            ApiSuccess::new(StatusCode::OK, "Device updated successfully", device.into())
        })
}
