use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::device::errors::DeviceError;
use crate::domain::device::models::Device;
use crate::domain::device::models::DeviceDetails;
use crate::domain::device::models::DeviceId;
use crate::domain::device::ports::DeviceRepository;
use crate::domain::device::ports::DeviceServicePort;

/// Domain service implementation for device management.
pub struct DeviceService<DR>
where
    DR: DeviceRepository,
{
    repository: Arc<DR>,
}

impl<DR> DeviceService<DR>
where
    DR: DeviceRepository,
{
    pub fn new(repository: Arc<DR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<DR> DeviceServicePort for DeviceService<DR>
where
    DR: DeviceRepository,
{
    async fn create_device(
        &self,
        details: DeviceDetails,
        created_by: &str,
    ) -> Result<Device, DeviceError> {
        if self.repository.find_by_name(&details.name).await?.is_some() {
            return Err(DeviceError::NameAlreadyExists(details.name.to_string()));
        }

        let device = self
            .repository
            .create(details, created_by)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create device");
                e
            })?;

        tracing::info!(device_id = %device.id, created_by = created_by, "Device created");
        Ok(device)
    }

    async fn list_devices(&self) -> Result<Vec<Device>, DeviceError> {
        self.repository.list_all().await
    }

    async fn get_device(&self, id: DeviceId) -> Result<Device, DeviceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(DeviceError::NotFound(id))
    }

    async fn update_device(
        &self,
        id: DeviceId,
        details: DeviceDetails,
        updated_by: &str,
    ) -> Result<Device, DeviceError> {
        self.get_device(id).await?;

        if let Some(existing) = self.repository.find_by_name(&details.name).await? {
            if existing.id != id {
                return Err(DeviceError::NameAlreadyExists(details.name.to_string()));
            }
        }

        self.repository.update(id, details, updated_by).await?;

        // Report what the store now holds, not what was sent.
        self.get_device(id).await
    }

    async fn delete_device(&self, id: DeviceId, deleted_by: &str) -> Result<(), DeviceError> {
        self.repository.delete(id, deleted_by).await
    }
}
