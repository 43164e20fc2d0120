pub mod create_device;
pub mod delete_device;
pub mod get_device;
pub mod list_devices;
pub mod update_device;

pub use create_device::create_device;
pub use delete_device::delete_device;
pub use get_device::get_device;
pub use list_devices::list_devices;
use serde::Deserialize;
use serde::Serialize;
pub use update_device::update_device;

use crate::domain::device::errors::DeviceError;
use crate::domain::device::models::Device;
use crate::domain::device::models::DeviceDetails;
use crate::domain::device::models::DeviceId;
use crate::domain::device::models::DeviceName;
use crate::domain::device::models::DeviceStatus;
use crate::inbound::http::handlers::ApiError;

/// Request body shared by device creation and replacement (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceRequest {
    name: String,
    #[serde(default)]
    location: String,
    status: String,
}

impl DeviceRequest {
    fn try_into_details(self) -> Result<DeviceDetails, DeviceError> {
        Ok(DeviceDetails {
            name: DeviceName::new(self.name)?,
            location: self.location.trim().to_string(),
            status: self.status.parse::<DeviceStatus>()?,
        })
    }
}

fn parse_device_id(raw: &str) -> Result<DeviceId, ApiError> {
    DeviceId::from_string(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceData {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub status: String,
}

impl From<&Device> for DeviceData {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id.0,
            name: device.name.as_str().to_string(),
            location: device.location.clone(),
            status: device.status.as_str().to_string(),
        }
    }
}
