use std::fmt;
use std::str::FromStr;

use crate::domain::device::errors::DeviceIdError;
use crate::domain::device::errors::DeviceNameError;
use crate::domain::device::errors::DeviceStatusError;

/// A managed device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: DeviceId,
    pub name: DeviceName,
    pub location: String,
    pub status: DeviceStatus,
}

/// Device identifier (database serial)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(pub i32);

impl DeviceId {
    /// Parse a device ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not a positive integer
    pub fn from_string(s: &str) -> Result<Self, DeviceIdError> {
        match s.parse::<i32>() {
            Ok(id) if id > 0 => Ok(DeviceId(id)),
            _ => Err(DeviceIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Device name, trimmed, 1-100 characters. Unique among live devices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceName(String);

impl DeviceName {
    const MAX_LENGTH: usize = 100;

    pub fn new(name: String) -> Result<Self, DeviceNameError> {
        let name = name.trim().to_string();
        let length = name.chars().count();

        if length == 0 {
            Err(DeviceNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(DeviceNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Connectivity state reported for a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
        }
    }
}

impl FromStr for DeviceStatus {
    type Err = DeviceStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" => Ok(DeviceStatus::Online),
            "offline" => Ok(DeviceStatus::Offline),
            _ => Err(DeviceStatusError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated device fields, used for both creation and full replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDetails {
    pub name: DeviceName,
    pub location: String,
    pub status: DeviceStatus,
}
