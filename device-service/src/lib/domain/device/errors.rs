use thiserror::Error;

use super::models::DeviceId;

/// Error for DeviceId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeviceIdError {
    #[error("Invalid device id: {0}")]
    InvalidFormat(String),
}

/// Error for DeviceName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeviceNameError {
    #[error("Device name is required")]
    Empty,

    #[error("Device name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeviceStatusError {
    #[error("Invalid device status '{0}': expected 'online' or 'offline'")]
    Unknown(String),
}

/// Top-level error for all device-related operations
#[derive(Debug, Clone, Error)]
pub enum DeviceError {
    #[error("Invalid device ID: {0}")]
    InvalidDeviceId(#[from] DeviceIdError),

    #[error("Invalid device name: {0}")]
    InvalidDeviceName(#[from] DeviceNameError),

    #[error("Invalid device status: {0}")]
    InvalidStatus(#[from] DeviceStatusError),

    #[error("Device not found: {0}")]
    NotFound(DeviceId),

    #[error("Device with name '{0}' already exists")]
    NameAlreadyExists(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for DeviceError {
    fn from(err: anyhow::Error) -> Self {
        DeviceError::Unknown(err.to_string())
    }
}
