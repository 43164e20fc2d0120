use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::role::errors::RoleError;
use crate::domain::role::models::Role;
use crate::domain::role::models::RoleId;
use crate::domain::role::models::RoleName;
use crate::domain::role::ports::RoleRepository;
use crate::domain::role::ports::RoleServicePort;

/// Domain service implementation for role management.
pub struct RoleService<RR>
where
    RR: RoleRepository,
{
    repository: Arc<RR>,
}

impl<RR> RoleService<RR>
where
    RR: RoleRepository,
{
    pub fn new(repository: Arc<RR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<RR> RoleServicePort for RoleService<RR>
where
    RR: RoleRepository,
{
    async fn create_role(&self, name: RoleName, created_by: &str) -> Result<Role, RoleError> {
        if self.repository.find_by_name(&name).await?.is_some() {
            return Err(RoleError::NameAlreadyExists(name.to_string()));
        }

        self.repository.create(name, created_by).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to create role");
            e
        })
    }

    async fn list_roles(&self) -> Result<Vec<Role>, RoleError> {
        self.repository.list_all().await
    }

    async fn get_role(&self, id: RoleId) -> Result<Role, RoleError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(RoleError::NotFound(id))
    }

    async fn update_role(
        &self,
        id: RoleId,
        name: RoleName,
        updated_by: &str,
    ) -> Result<Role, RoleError> {
        let mut role = self.get_role(id).await?;

        if role.name.is_builtin() && role.name != name {
            return Err(RoleError::BuiltinRename(role.name.to_string()));
        }

        if let Some(existing) = self.repository.find_by_name(&name).await? {
            if existing.id != id {
                return Err(RoleError::NameAlreadyExists(name.to_string()));
            }
        }

        role.name = name;
        self.repository.update(role, updated_by).await
    }

    async fn delete_role(&self, id: RoleId, deleted_by: &str) -> Result<(), RoleError> {
        // Fast path; the repository's guarded delete is authoritative.
        if self.repository.is_assigned(id).await? {
            return Err(RoleError::InUse(id));
        }

        self.repository.delete(id, deleted_by).await.map_err(|e| {
            if let RoleError::InUse(_) = e {
                tracing::warn!(role_id = %id, "Role was assigned during delete");
            }
            e
        })
    }
}
