use async_trait::async_trait;

use crate::domain::device::errors::DeviceError;
use crate::domain::device::models::Device;
use crate::domain::device::models::DeviceDetails;
use crate::domain::device::models::DeviceId;
use crate::domain::device::models::DeviceName;

/// Port for device domain service operations.
#[async_trait]
pub trait DeviceServicePort: Send + Sync + 'static {
    /// Register a device under a name no live device uses.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - A live device already has this name
    /// * `DatabaseError` - Database operation failed
    async fn create_device(
        &self,
        details: DeviceDetails,
        created_by: &str,
    ) -> Result<Device, DeviceError>;

    async fn list_devices(&self) -> Result<Vec<Device>, DeviceError>;

    /// # Errors
    /// * `NotFound` - Device does not exist or was deleted
    async fn get_device(&self, id: DeviceId) -> Result<Device, DeviceError>;

    /// Replace a device's fields and return the stored record.
    ///
    /// # Errors
    /// * `NotFound` - Device does not exist or was deleted
    /// * `NameAlreadyExists` - Another live device has this name
    async fn update_device(
        &self,
        id: DeviceId,
        details: DeviceDetails,
        updated_by: &str,
    ) -> Result<Device, DeviceError>;

    /// Soft-delete a device.
    ///
    /// # Errors
    /// * `NotFound` - Device does not exist or was already deleted
    async fn delete_device(&self, id: DeviceId, deleted_by: &str) -> Result<(), DeviceError>;
}

/// Persistence operations for devices. Reads only ever see live rows.
#[async_trait]
pub trait DeviceRepository: Send + Sync + 'static {
    /// # Errors
    /// * `NameAlreadyExists` - Unique index on live device names rejected the insert
    async fn create(&self, details: DeviceDetails, created_by: &str)
        -> Result<Device, DeviceError>;

    async fn find_by_id(&self, id: DeviceId) -> Result<Option<Device>, DeviceError>;

    async fn find_by_name(&self, name: &DeviceName) -> Result<Option<Device>, DeviceError>;

    async fn list_all(&self) -> Result<Vec<Device>, DeviceError>;

    /// # Errors
    /// * `NotFound` - No live row was updated
    /// * `NameAlreadyExists` - Unique index on live device names rejected the update
    async fn update(
        &self,
        id: DeviceId,
        details: DeviceDetails,
        updated_by: &str,
    ) -> Result<(), DeviceError>;

    /// # Errors
    /// * `NotFound` - No live row was deleted
    async fn delete(&self, id: DeviceId, deleted_by: &str) -> Result<(), DeviceError>;
}
