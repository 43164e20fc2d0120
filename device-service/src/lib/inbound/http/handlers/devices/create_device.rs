use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::DeviceData;
use super::DeviceRequest;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_device(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    body: Result<Json<DeviceRequest>, JsonRejection>,
) -> Result<ApiSuccess<DeviceData>, ApiError> {
    let Json(body) = body?;

    state
        .device_service
        .create_device(body.try_into_details()?, caller.actor())
        .await
        .map_err(ApiError::from)
        .map(|ref device| {
            ApiSuccess::new(StatusCode::OK, "Device created successfully", device.into())
        })
}
